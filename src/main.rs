fn main() {
    storefront::run();
}
