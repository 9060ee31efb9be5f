// A short dialogue reduced against a scripted interpreter.
//
// Run with `RUST_LOG=trace cargo run --example dialogue` to watch every
// single-step reduction.

use std::collections::VecDeque;

use copair::ask_tell::{ask, tell, AskTell, Responder};
use copair::{Interpreter, Program, Runner, RunnerConfig};
use tracing_subscriber::EnvFilter;

/// What the interpreter has seen so far.
#[derive(Clone, Debug, Default)]
struct Transcript {
    lines: Vec<String>,
    answers: VecDeque<i64>,
}

fn scripted(transcript: Transcript) -> Interpreter<AskTell, Transcript> {
    Interpreter::unfold(transcript, |transcript: Transcript| {
        let on_ask = transcript.clone();
        let on_tell = transcript.clone();
        (
            transcript,
            Responder::new(
                move |question| {
                    let mut next = on_ask;
                    let answer = next.answers.pop_front().unwrap_or_default();
                    next.lines.push(format!("? {question} -> {answer}"));
                    (answer, next)
                },
                move |message| {
                    let mut next = on_tell;
                    next.lines.push(format!("! {message}"));
                    next
                },
            ),
        )
    })
}

fn dialogue() -> Program<AskTell, i64> {
    tell("Welcome.")
        .then(ask("How many apples?"))
        .and_then(|apples| {
            ask("How many pears?").and_then(move |pears| {
                tell(format!("That makes {} pieces of fruit.", apples + pears)).map(move |()| apples + pears)
            })
        })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let transcript = Transcript {
        lines: Vec::new(),
        answers: VecDeque::from(vec![3, 4]),
    };
    let runner = Runner::new(RunnerConfig::new().with_step_limit(16).with_step_tracing(true));

    match runner.run(dialogue(), scripted(transcript), |total, transcript| (total, transcript)) {
        Ok(outcome) => {
            let (total, transcript) = outcome.value;
            for line in &transcript.lines {
                println!("{line}");
            }
            println!("total = {total} after {} steps", outcome.stats.steps);
        }
        Err(e) => eprintln!("dialogue did not finish: {e}"),
    }
}
