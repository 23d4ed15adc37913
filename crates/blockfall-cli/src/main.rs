mod command;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
