//! End-to-end OTP behavior through the public API.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_otp::state::{self, clipboard};
use spark_otp::{
    CellEvent, CellTrack, FormControl, InputKind, InputOtp, InputOtpProps, KeyboardEvent,
    OtpChangeEvent, ValueAccessor,
};

type Log = Rc<RefCell<Vec<OtpChangeEvent>>>;

fn setup(props: InputOtpProps) -> (InputOtp, Log) {
    clipboard::clear();
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let otp = InputOtp::new(InputOtpProps {
        on_change: Some(Rc::new(move |e: &OtpChangeEvent| sink.borrow_mut().push(e.clone()))),
        ..props
    })
    .unwrap();
    (otp, log)
}

fn values(log: &Log) -> Vec<String> {
    log.borrow().iter().map(|e| e.value.clone()).collect()
}

fn press(otp: &InputOtp, key: &str) {
    otp.handle_key(&KeyboardEvent::new(key));
}

#[test]
fn test_typing_four_digits() {
    let (otp, log) = setup(InputOtpProps { length: 4, ..Default::default() });
    otp.focus(0).unwrap();

    for key in ["1", "2", "3", "4"] {
        press(&otp, key);
    }

    assert_eq!(values(&log), vec!["1", "12", "123", "1234"]);
    assert_eq!(otp.focused(), Some(3));
    assert!(otp.is_complete());
}

#[test]
fn test_non_numeric_paste_is_discarded() {
    let (otp, log) = setup(InputOtpProps { length: 4, integer_only: true, ..Default::default() });
    otp.focus(0).unwrap();

    let result = otp.handle_paste("12a4");
    assert!(result.prevented);
    assert!(!result.changed);
    assert_eq!(otp.tokens(), vec!["", "", "", ""]);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_long_paste_fills_every_cell_once() {
    let (otp, log) = setup(InputOtpProps { length: 6, ..Default::default() });
    otp.focus(0).unwrap();

    otp.handle_paste("123456789");

    assert_eq!(otp.tokens(), vec!["1", "2", "3", "4", "5", "6"]);
    assert_eq!(values(&log), vec!["123456"]);
    assert_eq!(
        log.borrow()[0].original_event,
        CellEvent::Paste { index: 0, text: "123456789".into() }
    );
}

#[test]
fn test_numeric_paste_leaves_tail_unchanged() {
    let (otp, _log) = setup(InputOtpProps { length: 6, integer_only: true, ..Default::default() });
    otp.load_value("999999");
    otp.focus(4).unwrap();

    otp.handle_paste("12");
    assert_eq!(otp.value(), "129999");
}

#[test]
fn test_aggregate_tracks_tokens() {
    let (otp, log) = setup(InputOtpProps { length: 5, ..Default::default() });
    otp.focus(0).unwrap();

    press(&otp, "a");
    press(&otp, "b");
    otp.set_token(4, "z").unwrap();
    press(&otp, state::BACKSPACE);

    assert_eq!(otp.value(), otp.tokens().concat());
    for event in log.borrow().iter() {
        assert!(event.value.chars().count() <= otp.length());
    }
}

#[test]
fn test_backspace_on_empty_moves_back() {
    let (otp, log) = setup(InputOtpProps { length: 4, ..Default::default() });
    otp.focus(2).unwrap();

    press(&otp, state::BACKSPACE);
    assert_eq!(otp.focused(), Some(1));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_backspace_on_filled_clears_in_place() {
    let (otp, log) = setup(InputOtpProps { length: 4, ..Default::default() });
    otp.load_value("1234");
    otp.focus(2).unwrap();

    press(&otp, state::BACKSPACE);
    assert_eq!(otp.tokens(), vec!["1", "2", "", "4"]);
    assert_eq!(otp.focused(), Some(2));
    assert_eq!(values(&log), vec!["124"]);
    assert_eq!(
        log.borrow()[0].original_event,
        CellEvent::Input { index: 2, value: String::new(), kind: InputKind::DeleteContentBackward }
    );
}

#[test]
fn test_insert_at_last_cell_stays() {
    let (otp, _log) = setup(InputOtpProps { length: 4, ..Default::default() });
    otp.focus(3).unwrap();

    press(&otp, "7");
    assert_eq!(otp.focused(), Some(3));
    assert_eq!(otp.tokens(), vec!["", "", "", "7"]);
}

#[test]
fn test_load_value_is_idempotent_and_silent() {
    let (otp, log) = setup(InputOtpProps { length: 4, ..Default::default() });

    otp.load_value("4821");
    let first = otp.tokens();
    otp.load_value("4821");

    assert_eq!(otp.tokens(), first);
    assert_eq!(first, vec!["4", "8", "2", "1"]);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_navigation_walks_past_separators() {
    let (otp, _log) = setup(InputOtpProps {
        length: 6,
        track: Some(CellTrack::cells(6).decorate_after(2, "-").decorate_start("#")),
        ..Default::default()
    });
    otp.focus(0).unwrap();

    for key in ["1", "2", "3", "4"] {
        press(&otp, key);
    }
    assert_eq!(otp.value(), "1234");
    assert_eq!(otp.focused(), Some(4));

    press(&otp, state::ARROW_LEFT);
    press(&otp, state::ARROW_LEFT);
    assert_eq!(otp.focused(), Some(2));
}

#[test]
fn test_form_control_round_trip() {
    let (otp, log) = setup(InputOtpProps { length: 4, ..Default::default() });
    let control = FormControl::new("12");
    control.bind(&otp);

    // Binding pushes the form value in without echoing it back
    assert_eq!(otp.value(), "12");
    assert!(!control.dirty());
    assert!(log.borrow().is_empty());

    otp.focus(2).unwrap();
    press(&otp, "3");
    assert_eq!(control.value(), "123");
    assert!(control.dirty());

    control.set_value("9876");
    assert_eq!(otp.tokens(), vec!["9", "8", "7", "6"]);
    assert_eq!(log.borrow().len(), 1);

    otp.blur();
    assert!(control.touched());
}

#[test]
fn test_write_value_inside_on_change_does_not_loop() {
    let otp = InputOtp::new(InputOtpProps { length: 4, ..Default::default() }).unwrap();
    let calls = Rc::new(Cell::new(0));

    let handle = otp.clone();
    let counter = calls.clone();
    otp.register_on_change(Rc::new(move |value: &str| {
        counter.set(counter.get() + 1);
        // A form that normalizes and writes back
        handle.write_value(&value.to_uppercase());
    }));

    otp.focus(0).unwrap();
    press(&otp, "a");

    assert_eq!(calls.get(), 1);
    assert_eq!(otp.value(), "A");
}

#[test]
fn test_ctrl_v_and_bracketed_paste_share_the_filter() {
    let (otp, log) = setup(InputOtpProps { length: 4, integer_only: true, ..Default::default() });
    otp.focus(0).unwrap();

    clipboard::copy("12x4");
    let ctrl_v = KeyboardEvent::with_modifiers("v", state::Modifiers::ctrl());
    assert!(otp.handle_key(&ctrl_v).prevented);
    assert!(log.borrow().is_empty());

    clipboard::copy("5678");
    assert!(otp.handle_key(&ctrl_v).changed);
    assert_eq!(values(&log), vec!["5678"]);
    clipboard::clear();
}
