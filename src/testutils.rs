use std::path::{Path, PathBuf};

use crate::models::{Chunk, DatasetSplits, IntentRecord};

pub fn sample_dataset() -> DatasetSplits {
    DatasetSplits {
        train: vec![
            IntentRecord {
                intent: "PlayMusic".to_string(),
                data: vec![
                    Chunk::text("play the song "),
                    Chunk::entity("hello", "song_name"),
                ],
            },
            IntentRecord {
                intent: "PlayMusic".to_string(),
                data: vec![
                    Chunk::text("put on some "),
                    Chunk::entity("jazz", "genre"),
                    Chunk::text(" please"),
                ],
            },
            IntentRecord {
                intent: "GetWeather".to_string(),
                data: vec![
                    Chunk::text("will it rain in "),
                    Chunk::entity("New York", "city"),
                    Chunk::text("?"),
                ],
            },
            IntentRecord {
                intent: "GetWeather".to_string(),
                data: vec![Chunk::text("weather "), Chunk::entity("tomorrow", "date")],
            },
        ],
        valid: vec![IntentRecord {
            intent: "PlayMusic".to_string(),
            data: vec![Chunk::text("play "), Chunk::entity("some jazz", "genre")],
        }],
        test: vec![],
    }
}

pub fn test_data_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("tests")
}
