fn main() {
    tantu::cli::run()
}
