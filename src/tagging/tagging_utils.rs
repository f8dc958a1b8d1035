use serde::{Deserialize, Serialize};

pub const BEGINNING_PREFIX: &str = "B-";
pub const INSIDE_PREFIX: &str = "I-";
pub const LAST_PREFIX: &str = "L-";
pub const UNIT_PREFIX: &str = "U-";
pub const OUTSIDE: &str = "O";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaggingScheme {
    IO,
    BIO,
    BILOU,
}

impl Default for TaggingScheme {
    fn default() -> Self {
        TaggingScheme::BIO
    }
}

/// Tags of a slot made of `slot_size` tokens. An empty slot gives no tag at
/// all.
pub fn positive_tagging(
    tagging_scheme: TaggingScheme,
    slot_name: &str,
    slot_size: usize,
) -> Vec<String> {
    match tagging_scheme {
        TaggingScheme::IO => vec![format!("{}{}", INSIDE_PREFIX, slot_name); slot_size],
        TaggingScheme::BIO => {
            if slot_size > 0 {
                let mut tags = vec![format!("{}{}", BEGINNING_PREFIX, slot_name)];
                tags.extend(vec![
                    format!("{}{}", INSIDE_PREFIX, slot_name);
                    slot_size - 1
                ]);
                tags
            } else {
                vec![]
            }
        }
        TaggingScheme::BILOU => match slot_size {
            0 => vec![],
            1 => vec![format!("{}{}", UNIT_PREFIX, slot_name)],
            _ => {
                let mut tags = vec![format!("{}{}", BEGINNING_PREFIX, slot_name)];
                tags.extend(vec![
                    format!("{}{}", INSIDE_PREFIX, slot_name);
                    slot_size - 2
                ]);
                tags.push(format!("{}{}", LAST_PREFIX, slot_name));
                tags
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(raw_tags: &[&str]) -> Vec<String> {
        raw_tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn should_build_positive_tags_for_each_scheme() {
        assert_eq!(tags(&["I-dish", "I-dish"]), positive_tagging(TaggingScheme::IO, "dish", 2));
        assert_eq!(
            tags(&["B-dish", "I-dish", "I-dish"]),
            positive_tagging(TaggingScheme::BIO, "dish", 3)
        );
        assert_eq!(tags(&["U-dish"]), positive_tagging(TaggingScheme::BILOU, "dish", 1));
        assert_eq!(
            tags(&["B-dish", "I-dish", "L-dish"]),
            positive_tagging(TaggingScheme::BILOU, "dish", 3)
        );
    }

    #[test]
    fn should_tag_slot_named_like_the_outside_tag() {
        assert_eq!(tags(&["B-O", "I-O"]), positive_tagging(TaggingScheme::BIO, OUTSIDE, 2));
    }

    #[test]
    fn should_not_tag_empty_chunks() {
        assert!(positive_tagging(TaggingScheme::IO, "dish", 0).is_empty());
        assert!(positive_tagging(TaggingScheme::BIO, "dish", 0).is_empty());
        assert!(positive_tagging(TaggingScheme::BILOU, "dish", 0).is_empty());
    }

    #[test]
    fn should_deserialize_scheme_from_its_name() {
        let scheme: TaggingScheme = serde_json::from_str(r#""BILOU""#).unwrap();
        assert_eq!(TaggingScheme::BILOU, scheme);
        assert!(serde_json::from_str::<TaggingScheme>(r#""BIOES""#).is_err());
    }
}
