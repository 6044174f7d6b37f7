use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use fetch_sim::CellStore;
use grid_core::GridSession;
use shared::{
    domain::{CellIndex, CellView, GRID_COLUMNS, GRID_ROWS},
    protocol::FetchEvent,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::QueueLauncher;
use crate::ui::{details::DetailsContent, keys};

const CELL_SIZE: egui::Vec2 = egui::vec2(208.0, 64.0);
const CELL_GAP: f32 = 8.0;
const SIDE_PANEL_WIDTH: f32 = 256.0;

const KEY_BINDINGS: [(&str, &str); 6] = [
    ("Arrow Keys", "focus cells"),
    ("X Key", "select cells"),
    ("Shift + Arrow Keys", "Bulk select cells"),
    ("Space", "fetch quote on focused or selected cells"),
    ("Esc", "clear selected cells"),
    ("Ctrl + A", "select all cells"),
];

const SELECTION_NOTE: &str = "if there are cells selected, focused cell will not fetch. \
Bulk fetch will be triggered on multiple selected cell. Each fetch is a random quote.";

#[derive(Debug, Clone)]
struct StatusBanner {
    message: String,
}

#[derive(Debug, Clone, Copy)]
struct CellPalette {
    base: egui::Color32,
    focused: egui::Color32,
    selected: egui::Color32,
    ring: egui::Color32,
    border: egui::Color32,
    text: egui::Color32,
    selected_text: egui::Color32,
    muted: egui::Color32,
}

impl CellPalette {
    fn from_visuals(visuals: &egui::Visuals) -> Self {
        Self {
            base: visuals.faint_bg_color,
            focused: visuals.widgets.hovered.weak_bg_fill,
            selected: visuals.selection.bg_fill,
            ring: visuals.selection.stroke.color,
            border: visuals.widgets.noninteractive.bg_stroke.color,
            text: visuals.text_color(),
            selected_text: visuals.strong_text_color(),
            muted: visuals.weak_text_color(),
        }
    }
}

pub struct QuoteGridApp {
    session: GridSession<QueueLauncher>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    status_banner: Option<StatusBanner>,
    scrolled_focus: Option<CellIndex>,
}

impl QuoteGridApp {
    pub fn new(
        store: Arc<CellStore>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            session: GridSession::new(store, QueueLauncher::new(cmd_tx)),
            ui_rx,
            status: "Press space to start".to_string(),
            status_banner: None,
            scrolled_focus: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Fetch(FetchEvent::Started { index }) => {
                    self.status = format!("Fetching quote for cell {index}");
                }
                UiEvent::Fetch(FetchEvent::StageEntered { .. }) => {}
                UiEvent::Fetch(FetchEvent::Filled { index, quote }) => {
                    self.status = format!("Cell {index} now quotes {}", quote.author);
                }
                UiEvent::Error(err) => self.report_error(err),
            }
        }
    }

    fn report_error(&mut self, err: UiError) {
        tracing::error!(context = ?err.context(), "{}", err.message());
        self.status = format!("{} error: {}", err_label(err.category()), err.message());
        if err.is_fatal() {
            let message = match err.context() {
                UiErrorContext::BackendStartup => {
                    "The fetch worker failed to start; restart the app to fetch quotes."
                }
                UiErrorContext::Launch => "The fetch worker stopped; new fetches cannot start.",
            };
            self.status_banner = Some(StatusBanner {
                message: message.to_string(),
            });
        }
    }

    /// Feeds pressed keys to the grid and drops the ones it handled from egui's
    /// queue.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let session = &mut self.session;
        ctx.input_mut(|input| {
            input.events.retain(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => !session.handle_key(&keys::translate(*key, *modifiers)).consumed,
                _ => true,
            });
        });

        if let Some(status) = self.session.launcher().take_failure() {
            self.report_error(UiError::from_message(UiErrorContext::Launch, status));
        }
    }

    fn show_actions_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("actions_panel")
            .resizable(false)
            .exact_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Actions");
                ui.add_space(8.0);
                for (keys, action) in KEY_BINDINGS {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(format!("{keys}:")).strong());
                        ui.label(egui::RichText::new(action).weak());
                    });
                }
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new("Note:").small().strong());
                    ui.label(egui::RichText::new(SELECTION_NOTE).small().weak());
                });

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.add_space(8.0);
                    ui.small(egui::RichText::new(&self.status).weak());
                    self.show_status_banner(ui);
                });
            });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(111, 53, 53))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                    if ui.button("Dismiss").clicked() {
                        self.status_banner = None;
                    }
                });
        }
    }

    fn show_details_panel(&self, ctx: &egui::Context) {
        egui::SidePanel::right("details_panel")
            .resizable(false)
            .exact_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Details");
                ui.add_space(8.0);

                let content = DetailsContent::from_focus(self.session.focused_view());
                if let Some(placeholder) = content.placeholder() {
                    ui.label(egui::RichText::new(placeholder).weak());
                    return;
                }
                let DetailsContent::Quote(quote) = content else {
                    return;
                };

                ui.label(egui::RichText::new("Full Quote:").strong());
                ui.label(egui::RichText::new(&quote.text).weak());
                ui.add_space(6.0);
                ui.label(egui::RichText::new("Author:").strong());
                ui.label(egui::RichText::new(&quote.author).weak());
                ui.add_space(6.0);
                ui.label(egui::RichText::new("Tags:").strong());
                ui.horizontal_wrapped(|ui| {
                    for tag in &quote.tags {
                        egui::Frame::NONE
                            .fill(ui.visuals().faint_bg_color)
                            .corner_radius(6.0)
                            .inner_margin(egui::Margin::symmetric(8, 4))
                            .show(ui, |ui| {
                                ui.small(tag);
                            });
                    }
                });
            });
    }

    fn show_grid(&mut self, ctx: &egui::Context) {
        let focus = self.session.state().focus();
        let scroll_to_focus = focus != self.scrolled_focus;
        self.scrolled_focus = focus;

        egui::CentralPanel::default().show(ctx, |ui| {
            let palette = CellPalette::from_visuals(ui.visuals());
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(CELL_GAP, CELL_GAP);
                    for row in 0..GRID_ROWS {
                        ui.horizontal(|ui| {
                            for col in 0..GRID_COLUMNS {
                                let Some(index) = CellIndex::from_position(row, col) else {
                                    continue;
                                };
                                let focused = focus == Some(index);
                                let response = paint_cell(
                                    ui,
                                    &self.session.cell_view(index),
                                    focused,
                                    self.session.state().is_selected(index),
                                    palette,
                                );
                                if focused && scroll_to_focus {
                                    response.scroll_to_me(Some(egui::Align::Center));
                                }
                            }
                        });
                    }
                });
        });
    }
}

fn paint_cell(
    ui: &mut egui::Ui,
    view: &CellView,
    focused: bool,
    selected: bool,
    palette: CellPalette,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(CELL_SIZE, egui::Sense::hover());
    let painter = ui.painter();

    let fill = if selected {
        palette.selected
    } else if focused {
        palette.focused
    } else {
        palette.base
    };
    painter.rect_filled(rect, egui::CornerRadius::same(8), fill);

    let stroke = if focused {
        egui::Stroke::new(2.0, palette.ring)
    } else {
        egui::Stroke::new(1.0, palette.border)
    };
    painter.rect_stroke(
        rect,
        egui::CornerRadius::same(8),
        stroke,
        egui::StrokeKind::Inside,
    );

    let color = if view.is_loading() {
        palette.muted
    } else if selected {
        palette.selected_text
    } else {
        palette.text
    };
    let galley = painter.layout(
        view.label(),
        egui::FontId::proportional(13.0),
        color,
        rect.width() - 16.0,
    );
    let origin = rect.center() - galley.size() / 2.0;
    painter.galley(origin, galley, color);

    response
}

impl eframe::App for QuoteGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_keyboard(ctx);

        self.show_actions_panel(ctx);
        self.show_details_panel(ctx);
        self.show_grid(ctx);

        if self.session.cells().loading_count() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
