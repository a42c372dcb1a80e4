use crate::SessionState;

/// WHAT: Session state starts out not recording
/// WHY: The local mirror assumes a fresh remote session
#[test]
fn given_new_session_when_created_then_not_recording() {
    // Given/When: A fresh session
    let session = SessionState::new();

    // Then: Not recording
    assert!(!session.is_recording());
}

/// WHAT: Subscribers observe every flag change
/// WHY: Front-ends render the advisory flag from the receiver
#[test]
fn given_subscriber_when_flag_set_then_receiver_sees_latest_value() {
    // Given: A subscriber
    let mut session = SessionState::new();
    let receiver = session.subscribe();

    // When: Setting and clearing the flag
    session.set_recording(true);
    assert!(*receiver.borrow());
    session.set_recording(false);

    // Then: The receiver holds the latest value
    assert!(!*receiver.borrow());
    assert!(!session.is_recording());
}
