use serde::Serialize;

const BRAND_WORD: &str = "belong";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleSegment {
    pub text: String,
    pub highlighted: bool,
}

/// Splits a card title so the brand word can be rendered in the accent color.
///
/// Words are separated by single spaces, which are kept on the following
/// segment so concatenating `text` yields the original title.
pub fn highlight_title(title: &str) -> Vec<TitleSegment> {
    let mut segments: Vec<TitleSegment> = Vec::new();
    for (index, word) in title.split(' ').enumerate() {
        let separator = if index > 0 { " " } else { "" };
        let highlighted = word.eq_ignore_ascii_case(BRAND_WORD);
        let last_plain = segments.last().is_some_and(|last| !last.highlighted);

        if highlighted {
            if last_plain {
                if let Some(last) = segments.last_mut() {
                    last.text.push_str(separator);
                }
            } else if !separator.is_empty() {
                segments.push(plain(separator.to_string()));
            }
            segments.push(TitleSegment {
                text: word.to_string(),
                highlighted: true,
            });
        } else if last_plain {
            if let Some(last) = segments.last_mut() {
                last.text.push_str(separator);
                last.text.push_str(word);
            }
        } else {
            segments.push(plain(format!("{separator}{word}")));
        }
    }
    segments
}

fn plain(text: String) -> TitleSegment {
    TitleSegment {
        text,
        highlighted: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[TitleSegment]) -> String {
        segments.iter().map(|segment| segment.text.as_str()).collect()
    }

    #[test]
    fn brand_word_is_isolated_and_highlighted() {
        let segments = highlight_title("A Place to Belong");
        assert_eq!(
            segments,
            vec![
                TitleSegment {
                    text: "A Place to ".to_string(),
                    highlighted: false
                },
                TitleSegment {
                    text: "Belong".to_string(),
                    highlighted: true
                },
            ]
        );
    }

    #[test]
    fn plain_titles_stay_one_segment() {
        let segments = highlight_title("Our Homes");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].highlighted);
    }

    #[test]
    fn segments_reassemble_the_title() {
        for title in ["belong here", "We belong Belong together", "belong", ""] {
            assert_eq!(joined(&highlight_title(title)), title);
        }
    }

    #[test]
    fn punctuation_attached_words_are_not_highlighted() {
        let segments = highlight_title("Where you belong.");
        assert!(segments.iter().all(|segment| !segment.highlighted));
    }
}
