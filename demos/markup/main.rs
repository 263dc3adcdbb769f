mod parser;

use anyhow::Result;

use parser::tokenize;

fn main() -> Result<()> {
    let args = Args::parse()?;

    let data = args
        .input
        .as_deref()
        .unwrap_or("<html><body class=\"page\">Hello, <b>markup</b>!</body></html>");

    for token in tokenize(data) {
        println!("{token:?}");
    }
    Ok(())
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
                    println!("markup [INPUT]");
                    std::process::exit(0);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(res)
    }
}
