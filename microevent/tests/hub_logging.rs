//! Installs a global logger, so it lives in its own test binary.

use std::sync::{Mutex, OnceLock};

use crossbeam::channel::Receiver;
use log::{Level, LevelFilter};
use microevent::{
    EventHub, Listener,
    sink::{ChannelLogger, LogMessage},
};

struct Capture {
    receiver: Receiver<LogMessage>,
    seen: Mutex<Vec<LogMessage>>,
}

fn capture() -> &'static Capture {
    static CAPTURE: OnceLock<Capture> = OnceLock::new();
    CAPTURE.get_or_init(|| {
        let (logger, receiver) = ChannelLogger::with_receiver(LevelFilter::Trace);
        logger.install().expect("no other logger installed");
        Capture {
            receiver,
            seen: Mutex::new(Vec::new()),
        }
    })
}

/// Messages mentioning `event`. Tests run concurrently, so everything drained
/// is kept for the others.
fn messages_for(event: &str) -> Vec<LogMessage> {
    let capture = capture();
    let needle = format!("'{event}'");
    let mut seen = capture.seen.lock().unwrap();
    seen.extend(capture.receiver.try_iter());
    seen.iter()
        .filter(|message| message.message.contains(&needle))
        .cloned()
        .collect()
}

#[test]
fn dispatch_is_traced() {
    capture();
    let hub = EventHub::<u8>::new();
    hub.on("logging.dispatch", &Listener::new(|_: &EventHub<u8>, _: &u8| {}));
    hub.emit("logging.dispatch", &0);

    let messages = messages_for("logging.dispatch");

    assert!(messages.iter().all(|m| m.target == "microevent::hub"));
    assert!(
        messages
            .iter()
            .any(|m| m.level == Level::Trace && m.message == "emit 'logging.dispatch' to 1 listener(s)")
    );
    assert!(
        messages
            .iter()
            .any(|m| m.message == "on 'logging.dispatch': registered #0 (once: false)")
    );
}

#[test]
fn noop_operations_log_at_debug() {
    capture();
    let hub = EventHub::<u8>::new();
    let listener = Listener::new(|_: &EventHub<u8>, _: &u8| {});

    assert_eq!(hub.off("logging.missing", &listener), 0);
    assert_eq!(hub.emit("logging.missing", &0), 0);

    let messages: Vec<String> = messages_for("logging.missing")
        .into_iter()
        .filter(|m| m.level == Level::Debug)
        .map(|m| m.message)
        .collect();

    assert!(messages.contains(&"off 'logging.missing': no listeners registered".to_string()));
    assert!(messages.contains(&"emit 'logging.missing': no listeners registered".to_string()));
}
