fn main() {
    codetray_cli::run_main();
}
