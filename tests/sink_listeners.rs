//! The process-wide listener list. Kept in its own test binary because it
//! clears the list, which would race with other dumping tests.

use graph_dump::{
    add_listener, clear_listeners, dump, listener_count, DiagnosticSink, LogSink, MemorySink,
    LINE_ENDING,
};
use std::sync::Arc;

#[test]
fn listener_lifecycle() {
    // The default log sink is registered up front.
    assert_eq!(listener_count(), 1);

    clear_listeners();
    assert_eq!(listener_count(), 0);
    dump(&1u8, "nobody listens").expect("valid label");

    let first = Arc::new(MemorySink::new());
    let second = Arc::new(MemorySink::new());
    add_listener(first.clone());
    add_listener(second.clone());
    add_listener(Arc::new(LogSink::new(log::Level::Trace)));
    assert_eq!(listener_count(), 3);

    dump(&vec![1, 2], "numbers").expect("valid label");
    assert_eq!(first.contents(), second.contents());
    assert!(first.take().starts_with("#1: numbers ["));

    second.write_line("direct");
    assert!(second.contents().ends_with(&format!("direct{LINE_ENDING}")));

    clear_listeners();
    assert_eq!(listener_count(), 0);
}
