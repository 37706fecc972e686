fn main() {
    cookiekit::cli::run();
}
