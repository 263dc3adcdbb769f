mod parser;

use anyhow::Result;
use thresh::prelude::*;

use parser::json;

fn main() -> Result<()> {
    let args = Args::parse()?;

    let data = args.input.as_deref().unwrap_or(
        "  { \"a\"\t: 42,
  \"b\": [ \"x\", \"y\", 12 ] ,
  \"c\": { \"hello\" : \"world\"
  }
  } ",
    );

    match json().parse_all(TextCursor::new(data)) {
        ParseResult::Match { value, .. } => {
            println!("{value:#?}");
            Ok(())
        }
        miss => anyhow::bail!("{}", miss.error().expect("a failed parse renders a report")),
    }
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
                    println!("json [INPUT]");
                    std::process::exit(0);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(res)
    }
}
