fn main() {
    theater_api::main();
}
