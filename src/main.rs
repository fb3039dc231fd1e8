use std::process;

fn main() {
    if let Err(err) = cleansplit::run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
