//! yoga-admin main entrypoint.

use yoga_admin::errors::AppError;
use yoga_admin::run;

fn main() {
    if let Err(e) = run() {
        // Screens show their own errors.
        if !matches!(e, AppError::Reported(_)) {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
