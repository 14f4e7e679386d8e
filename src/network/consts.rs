pub const SUCCESS_STATUS: u16 = 200;
/// Reported for faults that never produced an HTTP response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;
