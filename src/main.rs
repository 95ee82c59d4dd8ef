fn main() {
    wpdi::run_cli();
}
