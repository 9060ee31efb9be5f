// Reducing ask/tell programs against ask/tell interpreters

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use copair::ask_tell::{ask, tell, AskTell, Request, Responder};
use copair::{evaluate, flip, CommandSet, Flip, Interpreter, Pairing, Program, Reduction, TreeReducer};
use proptest::prelude::*;

type Layer<B> = Interpreter<AskTell, B>;

/// A layer that answers every question with `answer` and never changes its annotation.
fn constant(tag: &'static str, answer: i64) -> Layer<&'static str> {
    Interpreter::unfold((), move |()| (tag, Responder::new(move |_| (answer, ()), |_| ())))
}

/// Answers 1 to every question; each handled command bumps the annotation.
fn counting() -> Layer<u64> {
    Interpreter::unfold(0u64, |n| (n, Responder::new(move |_| (1, n + 1), move |_| n + 1)))
}

fn ask_chain(n: u64) -> Program<AskTell, u64> {
    if n == 0 {
        Program::done(0)
    } else {
        Program::step(Request::Ask {
            question: format!("q{n}"),
            k: Box::new(move |answer| ask_chain(n - 1).map(move |rest| rest + answer as u64)),
        })
    }
}

#[test]
fn ask_feeds_answer_to_continuation() {
    let program: Program<AskTell, i64> = Program::step(Request::Ask {
        question: "x?".into(),
        k: Box::new(|r| Program::done(r + 1)),
    });
    let interpreter: Layer<&str> = Interpreter::new(
        "root",
        Responder::new(|_| (42, constant("next", 0)), |_| constant("unused", 0)),
    );

    assert_eq!(evaluate(program, interpreter, |v, s| (v, s)), (43, "next"));
}

#[test]
fn tell_continues_with_fixed_next() {
    let program: Program<AskTell, i32> = Program::step(Request::Tell {
        message: "hi".into(),
        next: Program::done(0),
    });
    let interpreter: Layer<&str> = Interpreter::new(
        "start",
        Responder::new(|_| (0, constant("unused", 0)), |_message| constant("ack", 0)),
    );

    assert_eq!(evaluate(program, interpreter, |v, s| (v, s)), (0, "ack"));
}

#[test]
fn two_step_chain_sums_answers() {
    let program: Program<AskTell, i64> = Program::step(Request::Ask {
        question: "a?".into(),
        k: Box::new(|r1| {
            Program::step(Request::Ask {
                question: "b?".into(),
                k: Box::new(move |r2| Program::done(r1 + r2)),
            })
        }),
    });

    assert_eq!(evaluate(program, counting(), |v, s| (v, s)), (2, 2));
}

#[test]
fn done_program_keeps_root_annotation() {
    let program: Program<AskTell, &str> = Program::done("value");
    assert_eq!(evaluate(program, counting(), |v, s| (v, s)), ("value", 0));
}

#[test]
fn single_step_matches_manual_reduction() {
    let handlers = || Responder::new(|q: String| (q.len() as i64, 10u8), |_| 20u8);
    let command = || Request::Ask {
        question: "four".into(),
        k: Box::new(|r: i64| r * 2),
    };

    let stepped = AskTell::annihilate(|p, i| (p, i), command(), handlers());

    let (r, next) = (handlers().ask)("four".to_string());
    let Request::Ask { k, .. } = command() else {
        unreachable!()
    };
    assert_eq!(stepped, (k(r), next));
    assert_eq!(stepped, (8, 10));
}

#[test]
fn coannihilate_is_flipped_annihilate() {
    let handlers = || Responder::new(|_| (5, 'n'), |_| 't');
    let command = || Request::Tell {
        message: "m".into(),
        next: "rest",
    };

    let forward = AskTell::annihilate(|p, i| format!("{p}/{i}"), command(), handlers());
    let backward = AskTell::coannihilate(flip(|p: &str, i: char| format!("{p}/{i}")), handlers(), command());
    assert_eq!(forward, backward);
    assert_eq!(forward, "rest/t");
}

#[test]
fn unselected_handlers_never_run() {
    let asks = Rc::new(Cell::new(0u32));
    let tells = Rc::new(Cell::new(0u32));
    let (a, t) = (asks.clone(), tells.clone());
    let interpreter: Layer<()> = Interpreter::unfold((), move |()| {
        let (a, t) = (a.clone(), t.clone());
        (
            (),
            Responder::new(
                move |_| {
                    a.set(a.get() + 1);
                    (0, ())
                },
                move |_| {
                    t.set(t.get() + 1);
                },
            ),
        )
    });

    let program = tell("one").then(tell("two")).then(tell("three"));
    evaluate(program, interpreter, |(), ()| ());

    assert_eq!(asks.get(), 0);
    assert_eq!(tells.get(), 3);
}

#[test]
fn builders_sequence_commands() {
    let program = tell("hello")
        .then(ask("a?"))
        .and_then(|a| ask("b?").map(move |b| a * 10 + b));

    assert_eq!(evaluate(program, counting(), |v, s| (v, s)), (11, 3));
}

#[test]
fn interpreter_first_pairing_agrees() {
    let forward = evaluate(ask_chain(5), counting(), |v, s| (v, s));
    let backward = <Flip<TreeReducer<AskTell>> as Pairing<_, _, u64, u64>>::pair(
        |s, v| (v, s),
        counting(),
        ask_chain(5),
    );
    assert_eq!(forward, backward);
    assert_eq!(forward, (5, 5));
}

#[test]
fn stepping_by_hand_reaches_the_same_value() {
    let mut reduction = Reduction::new(ask_chain(3), counting());
    let mut steps = 0;
    while !reduction.is_terminal() {
        reduction = reduction.step();
        steps += 1;
    }
    assert_eq!(steps, 3);
    assert_eq!(reduction.finish(|v, s| (v, s)).ok(), Some((3, 3)));
}

#[test]
fn long_chains_do_not_exhaust_the_stack() {
    let n = 200_000;
    let program = (0..n).fold(Program::done(()), |rest, _| tell("tick").then(rest));
    assert_eq!(evaluate(program, counting(), |(), s| s), n);
}

#[test]
fn left_nested_binds_do_not_exhaust_the_stack() {
    let n = 100_000;
    let program = (0..n).fold(Program::done(0), |acc: Program<AskTell, i64>, _| {
        acc.and_then(|x| ask("q").map(move |a| x + a))
    });
    assert_eq!(evaluate(program, counting(), |v, s| (v, s)), (n as i64, n));
}

#[test]
fn left_nested_sequencing_keeps_command_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let interpreter: Layer<()> = Interpreter::unfold((), move |()| {
        let log = log.clone();
        ((), Responder::new(|_| (0, ()), move |message| log.borrow_mut().push(message)))
    });

    let program = (0..5).fold(Program::done(()), |acc: Program<AskTell, ()>, i| acc.then(tell(format!("{i}"))));
    evaluate(program, interpreter, |(), ()| ());

    assert_eq!(*seen.borrow(), ["0", "1", "2", "3", "4"]);
}

#[test]
fn long_programs_drop_without_running() {
    let right = (0..200_000).fold(Program::done(()), |rest, _| tell("tick").then(rest));
    let left = (0..200_000).fold(Program::done(()), |acc: Program<AskTell, ()>, _| acc.then(tell("tick")));
    let binds = (0..200_000).fold(Program::done(0), |acc: Program<AskTell, i64>, _| {
        acc.and_then(|x| ask("q").map(move |a| x + a))
    });
    drop(right);
    drop(left);
    drop(binds);
}

#[test]
fn half_reduced_program_drops_cleanly() {
    let program = (0..200_000).fold(Program::done(()), |rest, _| tell("tick").then(rest));
    let mut reduction = Reduction::new(program, counting());
    for _ in 0..10 {
        reduction = reduction.step();
    }
    assert!(!reduction.is_terminal());
    drop(reduction);
}

#[test]
fn deep_answer_chain_reaches_its_sum() {
    let n = 100_000;
    assert_eq!(evaluate(ask_chain(n), counting(), |v, s| (v, s)), (n, n));
}

#[test]
fn resolve_exposes_the_first_command() {
    let program = tell("a").then(ask("b?")).map(|b| b + 1);
    assert!(matches!(program, Program::Bind(_)));
    assert!(!program.is_done());
    assert!(matches!(program.resolve(), Program::Step(_)));

    let finished = Program::<AskTell, i64>::done(1).map(|v| v + 1).resolve();
    assert_eq!(finished.value(), Some(&2));
}

proptest! {
    #[test]
    fn steps_equal_chain_length(n in 0u64..1_000) {
        let mut reduction = Reduction::new(ask_chain(n), counting());
        let mut steps = 0u64;
        while !reduction.is_terminal() {
            reduction = reduction.step();
            steps += 1;
        }
        prop_assert_eq!(steps, n);
        prop_assert_eq!(reduction.finish(|v, s| (v, s)).ok(), Some((n, n)));
    }
}
