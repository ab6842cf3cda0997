fn main() {
    hotseat_chess::terminal::run_interactive_terminal();
}
