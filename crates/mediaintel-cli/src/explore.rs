//! Line commands for the interactive `explore` session.

use chrono::NaiveDate;
use mediaintel_core::{Field, Persona};

pub(crate) const HELP: &str = "\
commands:
  set <platform|sentiment|media-type|location> <value>   constrain a field
  unset <platform|sentiment|media-type|location>         remove one constraint
  from [YYYY-MM-DD]    set (or clear) the start date
  to [YYYY-MM-DD]      set (or clear) the end date
  clear                remove all constraints
  incomplete <keep|drop>
  persona <professional|consultant>
  show                 print the report for the current selection
  options              list the values each filter accepts
  summarize            ask the model for a campaign summary (ctrl-c cancels)
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExploreCommand {
    Set(Field, String),
    Unset(Field),
    From(Option<NaiveDate>),
    To(Option<NaiveDate>),
    Clear,
    Incomplete { drop: bool },
    Persona(Persona),
    Show,
    Options,
    Summarize,
    Help,
    Quit,
}

fn parse_field(name: &str) -> Result<Field, String> {
    match name {
        "platform" => Ok(Field::Platform),
        "sentiment" => Ok(Field::Sentiment),
        "media-type" | "media_type" => Ok(Field::MediaType),
        "location" => Ok(Field::Location),
        other => Err(format!("unknown filter field '{other}'")),
    }
}

fn parse_optional_date(arg: &str) -> Result<Option<NaiveDate>, String> {
    if arg.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| format!("invalid date '{arg}': {e}"))
}

/// Parse one input line. Values after `set <field>` keep their inner spaces.
pub(crate) fn parse_command(line: &str) -> Result<ExploreCommand, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match verb {
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: set <field> <value>".to_string())?;
            Ok(ExploreCommand::Set(
                parse_field(field)?,
                value.trim().to_string(),
            ))
        }
        "unset" => Ok(ExploreCommand::Unset(parse_field(rest)?)),
        "from" => Ok(ExploreCommand::From(parse_optional_date(rest)?)),
        "to" => Ok(ExploreCommand::To(parse_optional_date(rest)?)),
        "clear" => Ok(ExploreCommand::Clear),
        "incomplete" => match rest {
            "keep" => Ok(ExploreCommand::Incomplete { drop: false }),
            "drop" => Ok(ExploreCommand::Incomplete { drop: true }),
            _ => Err("usage: incomplete <keep|drop>".to_string()),
        },
        "persona" => rest.parse().map(ExploreCommand::Persona),
        "show" => Ok(ExploreCommand::Show),
        "options" => Ok(ExploreCommand::Options),
        "summarize" | "summary" => Ok(ExploreCommand::Summarize),
        "help" | "?" => Ok(ExploreCommand::Help),
        "quit" | "exit" => Ok(ExploreCommand::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}
