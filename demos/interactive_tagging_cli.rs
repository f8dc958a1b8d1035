extern crate clap;
extern crate env_logger;
extern crate intent_slot;
extern crate serde_json;

use std::fs::File;
use std::io;
use std::io::Write;

use clap::{App, Arg};
use intent_slot::{
    lowercase_tokens, tag_utterance, Chunk, DataType, DatasetSplits, IntentSlotIterator,
    IteratorConfig, Pipeline, TaggingScheme,
};

fn main() {
    env_logger::Builder::from_default_env()
        .default_format_timestamp_nanos(true)
        .init();

    let matches = App::new("intent-slot-tag")
        .about("Interactive CLI for BIO tagging of intent datasets")
        .arg(
            Arg::with_name("DATASET")
                .required(true)
                .takes_value(true)
                .index(1)
                .help("path to a json dataset with train, valid and test splits"),
        )
        .arg(
            Arg::with_name("split")
                .short("s")
                .long("--split")
                .takes_value(true)
                .possible_values(&["train", "valid", "test"])
                .help("split of the dataset to print"),
        )
        .arg(
            Arg::with_name("lowercase")
                .short("l")
                .long("--lowercase")
                .help("lowercase tokens before printing them"),
        )
        .arg(
            Arg::with_name("pipeline")
                .short("p")
                .long("--pipeline")
                .takes_value(true)
                .help("pipeline config to run on the records of the split"),
        )
        .get_matches();
    let dataset_path = matches.value_of("DATASET").unwrap();
    let data_type = match matches.value_of("split").unwrap_or("train") {
        "valid" => DataType::Valid,
        "test" => DataType::Test,
        _ => DataType::Train,
    };
    let lowercase = matches.is_present("lowercase");

    println!("\nLoading the dataset...");
    let splits = DatasetSplits::from_reader(File::open(dataset_path).unwrap()).unwrap();

    if let Some(pipeline_path) = matches.value_of("pipeline") {
        let pipeline = Pipeline::from_path(pipeline_path).unwrap();
        let records = serde_json::to_value(splits.split(data_type)).unwrap();
        let outputs = pipeline.call(vec![records]).unwrap();
        println!("{}", serde_json::to_string_pretty(&outputs).unwrap());
    } else {
        let iterator = IntentSlotIterator::new(&splits, IteratorConfig::default());
        for sentence in iterator.sentences(data_type) {
            let mut sentence = sentence.clone();
            if lowercase {
                sentence.tokens = lowercase_tokens(&sentence.tokens);
            }
            println!("{}", sentence.to_json());
        }
    }

    println!("\nType an utterance, with slots written as [entity](text):");
    loop {
        print!("> ");
        io::stdout().flush().unwrap();
        let mut query = String::new();
        if io::stdin().read_line(&mut query).unwrap() == 0 {
            break;
        }
        let tagged = tag_utterance(&parse_chunks(query.trim()), TaggingScheme::BIO);
        let result_json = serde_json::to_string_pretty(&tagged).unwrap();
        println!("{}", result_json);
    }
}

/// "play [song_name](hello)" gives an unlabeled chunk then a `song_name`
/// chunk.
fn parse_chunks(input: &str) -> Vec<Chunk> {
    let mut chunks = vec![];
    let mut rest = input;
    while let Some(start) = rest.find('[') {
        let parsed = rest[start..].find("](").and_then(|middle| {
            rest[start + middle..]
                .find(')')
                .map(|end| (start + middle, start + middle + end))
        });
        let (middle, end) = match parsed {
            Some(indexes) => indexes,
            None => break,
        };
        chunks.push(Chunk::text(&rest[..start]));
        chunks.push(Chunk::entity(&rest[middle + 2..end], &rest[start + 1..middle]));
        rest = &rest[end + 1..];
    }
    chunks.push(Chunk::text(rest));
    chunks
}
