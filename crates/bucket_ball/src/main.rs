fn main() {
    bucket_ball::run();
}
