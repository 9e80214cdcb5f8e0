fn main() {
    std::process::exit(msgpass::app::startup::startup());
}
