fn main() {
    glee_config::app::cli::run();
}
