use std::cell::Cell;

use proptest::prelude::*;
use tee_app_abi::{MAX_INPUT_ARG, MAX_SECURE_SERVICES, SERVICE_CALL_FAILED, Word};
use tee_dispatch::{ServiceFn, ServiceTable, WordCursor, dispatch};

thread_local! {
    static INVOCATIONS: Cell<usize> = const { Cell::new(0) };
    static SEEN: Cell<[Word; 9]> = const { Cell::new([0; 9]) };
}

fn invocations() -> usize {
    INVOCATIONS.with(Cell::get)
}

fn bump() {
    INVOCATIONS.with(|c| c.set(c.get() + 1));
}

extern "C-unwind" fn invalid() -> Word {
    panic!("invalid secure service");
}

extern "C-unwind" fn add(a: Word, b: Word) -> Word {
    bump();
    a.wrapping_add(b)
}

extern "C-unwind" fn mul(a: Word, b: Word) -> Word {
    bump();
    a.wrapping_mul(b)
}

#[allow(clippy::too_many_arguments)]
extern "C-unwind" fn record9(
    a0: Word,
    a1: Word,
    a2: Word,
    a3: Word,
    a4: Word,
    a5: Word,
    a6: Word,
    a7: Word,
    s0: Word,
) -> Word {
    bump();
    SEEN.with(|s| s.set([a0, a1, a2, a3, a4, a5, a6, a7, s0]));
    0
}

static TABLE: ServiceTable = ServiceTable::new(ServiceFn::Args0(invalid))
    .with_slot(7, ServiceFn::Args2(add))
    .with_slot(8, ServiceFn::Args2(mul))
    .with_slot(20, ServiceFn::Args9(record9));

#[test]
fn adder_in_slot_seven_gets_the_trailing_words() {
    let words = [7, 8, 9];
    let mut ap = WordCursor::new(&words);
    assert_eq!(dispatch(&TABLE, 3, &mut ap), 17);
    assert_eq!(ap.consumed(), 3);
    assert!(ap.is_ended());
}

#[test]
fn eleven_words_never_touch_the_table() {
    let before = invocations();
    let words = [7; 11];
    let mut ap = WordCursor::new(&words);
    assert_eq!(dispatch(&TABLE, 11, &mut ap), SERVICE_CALL_FAILED);
    assert_eq!(ap.consumed(), 0);
    assert_eq!(invocations(), before);
}

#[test]
fn nine_arguments_arrive_in_order() {
    let words = [20, 11, 12, 13, 14, 15, 16, 17, 18, 19];
    assert_eq!(dispatch(&TABLE, words.len(), &mut WordCursor::new(&words)), 0);
    assert_eq!(SEEN.with(Cell::get), [11, 12, 13, 14, 15, 16, 17, 18, 19]);
}

#[test]
#[should_panic(expected = "invalid secure service")]
fn slot_zero_aborts() {
    dispatch(&TABLE, 1, &mut WordCursor::new(&[0]));
}

#[test]
#[should_panic(expected = "invalid secure service")]
fn unassigned_slot_aborts() {
    dispatch(&TABLE, 3, &mut WordCursor::new(&[9, 1, 2]));
}

proptest! {
    #[test]
    fn argc_overflow_is_refused_without_reading(argc in MAX_INPUT_ARG + 1..64usize, fill in any::<usize>()) {
        let before = invocations();
        let words = vec![fill; argc];
        let mut ap = WordCursor::new(&words);
        prop_assert_eq!(dispatch(&TABLE, argc, &mut ap), SERVICE_CALL_FAILED);
        prop_assert_eq!(ap.consumed(), 0);
        prop_assert!(ap.is_ended());
        prop_assert_eq!(invocations(), before);
    }

    #[test]
    fn out_of_range_ids_are_refused(sid in MAX_SECURE_SERVICES.., rest in proptest::collection::vec(any::<usize>(), 0..MAX_INPUT_ARG)) {
        let before = invocations();
        let mut words = vec![sid];
        words.extend(rest);
        let mut ap = WordCursor::new(&words);
        prop_assert_eq!(dispatch(&TABLE, words.len(), &mut ap), SERVICE_CALL_FAILED);
        prop_assert_eq!(ap.consumed(), 1);
        prop_assert!(ap.is_ended());
        prop_assert_eq!(invocations(), before);
    }

    #[test]
    fn two_word_services_see_both_words(a in any::<usize>(), b in any::<usize>()) {
        prop_assert_eq!(dispatch(&TABLE, 3, &mut WordCursor::new(&[7, a, b])), a.wrapping_add(b));
        prop_assert_eq!(dispatch(&TABLE, 3, &mut WordCursor::new(&[8, a, b])), a.wrapping_mul(b));
    }

    #[test]
    fn argument_order_is_preserved(args in proptest::array::uniform9(any::<usize>())) {
        let mut words = vec![20];
        words.extend_from_slice(&args);
        dispatch(&TABLE, words.len(), &mut WordCursor::new(&words));
        prop_assert_eq!(SEEN.with(Cell::get), args);
    }
}
