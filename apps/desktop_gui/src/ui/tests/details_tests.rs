use super::*;

use shared::corpus::QUOTES;

#[test]
fn without_focus_prompts_for_activation() {
    let content = DetailsContent::from_focus(None);
    assert_eq!(content, DetailsContent::Inactive);
    assert_eq!(
        content.placeholder(),
        Some("Press space to activate keyboard navigation")
    );
}

#[test]
fn empty_and_loading_cells_read_as_empty() {
    let empty = DetailsContent::from_focus(Some((CellIndex::FIRST, CellView::Empty)));
    assert_eq!(empty.placeholder(), Some("Cell is empty"));

    let loading = DetailsContent::from_focus(Some((
        CellIndex::FIRST,
        CellView::Loading {
            message: Some("Logging in...".to_string()),
        },
    )));
    assert_eq!(loading, DetailsContent::Empty);
}

#[test]
fn filled_cell_exposes_the_full_quote() {
    let quote = QUOTES[0].to_quote();
    let content = DetailsContent::from_focus(Some((CellIndex::FIRST, CellView::Filled(quote.clone()))));
    assert_eq!(content.placeholder(), None);
    match content {
        DetailsContent::Quote(shown) => {
            assert_eq!(shown.text, quote.text);
            assert_eq!(shown.author, quote.author);
            assert_eq!(shown.tags, quote.tags);
        }
        other => panic!("unexpected details {other:?}"),
    }
}
