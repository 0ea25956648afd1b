//! schedics main entrypoint.

use schedics::run;
use schedics::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
