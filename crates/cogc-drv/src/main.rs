fn main() {
    if let Err(e) = cogc_drv::main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
