mod command;
mod driver;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
