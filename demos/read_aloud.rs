use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use readspell_rs::{
    config::ReaderConfig,
    oracles::{CachedOracle, StrictOracle},
    reading::LineReadingSession,
    spelling::{PuzzleEvent, SpellingPuzzle, SpellingQuestion},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ReaderConfig::load(Path::new(&path))?,
        None => ReaderConfig::default(),
    };

    // Spelling
    let question = SpellingQuestion::new("pet-3", "black")
        .with_sentence("The puppy has a black nose.")
        .with_prefilled([0, 1]);
    let mut puzzle = SpellingPuzzle::new(&question);
    println!("Prompt: {}", puzzle.carrier_sentence());
    println!("Segments: {:?}", puzzle.segments());

    for (attempt, letters) in ["AKK", "ACK"].iter().enumerate() {
        for (idx, letter) in letters.chars().enumerate() {
            let update = puzzle.set_letter(idx, Some(letter));
            match update.event {
                Some(PuzzleEvent::FirstIncorrect { candidate }) => {
                    println!("Attempt {}: {candidate} is not quite right", attempt + 1)
                }
                Some(PuzzleEvent::Solved { word }) => println!("Solved: {word}"),
                None => {}
            }
        }
    }
    println!("Letter feedback: {:?}", puzzle.letter_feedback());

    // Reading
    let mut session = LineReadingSession::new();
    let line = session.begin(
        "After lunch the happy puppy jumped over the garden fence twice.",
        "over",
        &config.window,
    );
    println!("Read aloud: {}", line.target_line);

    let transcript = "um the happy puppy jumped over the";
    let words: Vec<&str> = transcript.split_whitespace().collect();
    for n in 1..=words.len() {
        let partial = words[..n].join(" ");
        println!("{partial:<40} -> {}", session.observe_partial(&partial));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let oracle = Arc::new(CachedOracle::new(StrictOracle));

    let start = Instant::now();
    let result = runtime.block_on(session.evaluate_final(transcript, oracle, &config.evaluation));
    match result {
        Some(result) => println!(
            "Graded in {:.2?}: {}/{} correct ({:.0}%)\n{}",
            start.elapsed(),
            result.correct_count,
            result.total_target_words,
            result.accuracy * 100.0,
            serde_json::to_string_pretty(&result)?
        ),
        None => println!("Question changed before grading finished"),
    }

    Ok(())
}
