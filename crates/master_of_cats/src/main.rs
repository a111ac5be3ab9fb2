fn main() -> bevy::app::AppExit {
    master_of_cats::run()
}
