mod parser;

use anyhow::Result;
use thresh::prelude::*;

use parser::expr;

fn main() -> Result<()> {
    let args = Args::parse()?;

    let data = args.input.as_deref().unwrap_or("3 + 5 * (2 - 8) / 2");

    let result = match expr().parse_all(TextCursor::new(data)) {
        ParseResult::Match { value, .. } => {
            println!("{data} = {value}");
            Ok(())
        }
        miss => anyhow::bail!("{}", miss.error().expect("a failed parse renders a report")),
    };
    result
}

struct Args {
    input: Option<String>,
}

impl Args {
    fn parse() -> Result<Self, lexopt::Error> {
        use lexopt::prelude::*;

        let mut res = Args { input: None };

        let mut args = lexopt::Parser::from_env();
        while let Some(arg) = args.next()? {
            match arg {
                Value(input) => res.input = Some(input.string()?),
                Long("help") => {
                    println!("arithmetic [EXPR]");
                    std::process::exit(0);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(res)
    }
}
