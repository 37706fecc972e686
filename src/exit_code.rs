use crate::error::CookieError;

/// Exit code used when a lookup or removal found nothing.
pub const NOT_FOUND: i32 = 1;

pub fn exit_code_for_error(err: &CookieError) -> i32 {
    match err {
        CookieError::MissingKey | CookieError::ReservedKey(_) | CookieError::Config(_) => 2,
        CookieError::Io(err) => io_exit_code(err),
        CookieError::Json(_) => 26,
    }
}

fn io_exit_code(err: &std::io::Error) -> i32 {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => 37,
        _ => 23,
    }
}
