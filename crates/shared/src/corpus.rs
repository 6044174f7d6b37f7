//! The fixed set of quotes a fetch run can resolve to.

use crate::domain::Quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteEntry {
    pub text: &'static str,
    pub author: &'static str,
    pub tags: &'static [&'static str],
}

impl QuoteEntry {
    pub fn to_quote(&self) -> Quote {
        Quote {
            text: self.text.to_string(),
            author: self.author.to_string(),
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }
}

impl From<&QuoteEntry> for Quote {
    fn from(value: &QuoteEntry) -> Self {
        value.to_quote()
    }
}

pub const QUOTES: [QuoteEntry; 10] = [
    QuoteEntry {
        text: "The world as we have created it is a process of our thinking. It cannot be changed without changing our thinking.",
        author: "Albert Einstein",
        tags: &["change", "deep-thoughts", "thinking", "world"],
    },
    QuoteEntry {
        text: "It is our choices, Harry, that show what we truly are, far more than our abilities.",
        author: "J.K. Rowling",
        tags: &["abilities", "choices"],
    },
    QuoteEntry {
        text: "There are only two ways to live your life. One is as though nothing is a miracle. The other is as though everything is a miracle.",
        author: "Albert Einstein",
        tags: &["inspirational", "life", "live", "miracle", "miracles"],
    },
    QuoteEntry {
        text: "The person, be it gentleman or lady, who has not pleasure in a good novel, must be intolerably stupid.",
        author: "Jane Austen",
        tags: &["aliteracy", "books", "classic", "humor"],
    },
    QuoteEntry {
        text: "Imperfection is beauty, madness is genius and it's better to be absolutely ridiculous than absolutely boring.",
        author: "Marilyn Monroe",
        tags: &["be-yourself", "inspirational"],
    },
    QuoteEntry {
        text: "Try not to become a man of success. Rather become a man of value.",
        author: "Albert Einstein",
        tags: &["adulthood", "success", "value"],
    },
    QuoteEntry {
        text: "It is better to be hated for what you are than to be loved for what you are not.",
        author: "André Gide",
        tags: &["life", "love"],
    },
    QuoteEntry {
        text: "I have not failed. I've just found 10,000 ways that won't work.",
        author: "Thomas A. Edison",
        tags: &["edison", "failure", "inspirational", "paraphrased"],
    },
    QuoteEntry {
        text: "A woman is like a tea bag; you never know how strong it is until it's in hot water.",
        author: "Eleanor Roosevelt",
        tags: &["misattributed-eleanor-roosevelt"],
    },
    QuoteEntry {
        text: "A day without sunshine is like, you know, night.",
        author: "Steve Martin",
        tags: &["humor", "obvious", "simile"],
    },
];

pub fn quote_at(index: usize) -> Option<Quote> {
    QUOTES.get(index).map(QuoteEntry::to_quote)
}

pub fn contains(quote: &Quote) -> bool {
    QUOTES.iter().any(|entry| entry.to_quote() == *quote)
}
