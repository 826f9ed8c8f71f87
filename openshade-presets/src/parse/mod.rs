mod token;

use nom_locate::LocatedSpan;

pub(crate) type Span<'a> = LocatedSpan<&'a str>;
pub(crate) use token::{do_lex, Token};
