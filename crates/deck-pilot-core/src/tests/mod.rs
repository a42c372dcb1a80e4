mod lifecycle;
mod session_state;
