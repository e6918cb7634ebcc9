fn main() {
    train_eater::game::run();
}
