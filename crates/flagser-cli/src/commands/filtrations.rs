use std::error::Error;

use clap::Args;
use flagser_core::filtration::FiltrationKind;

#[derive(Args, Debug)]
pub struct FiltrationsArgs {
    /// Print the list as a JSON array.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &FiltrationsArgs) -> Result<(), Box<dyn Error>> {
    let names = FiltrationKind::implemented_names();
    if args.json {
        println!("{}", serde_json::to_string(&names)?);
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}
