use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_while, take_while_m_n};
use nom::character::complete::char;
use nom::combinator::{all_consuming, map, map_res, opt, rest};
use nom::multi::separated_list0;
use nom::sequence::pair;
use nom::IResult;

/// Raw entries of a comma-separated tag list. Entries are not trimmed and may be blank.
pub fn tag_list_entries(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(','), take_while(|c: char| c != ','))(input)
}

/// A number written with one to four ASCII digits, nothing else.
pub fn short_number(input: &str) -> IResult<&str, u16> {
    all_consuming(map_res(
        take_while_m_n(1, 4, |c: char| c.is_ascii_digit()),
        str::parse,
    ))(input)
}

/// Type labels as used in listing names: `images`, `non_images`, `not_images`.
/// Returns whether the label was negated and the remaining type name.
pub fn type_label(input: &str) -> IResult<&str, (bool, &str)> {
    all_consuming(pair(
        map(
            opt(alt((tag_no_case("non_"), tag_no_case("not_"), tag("!")))),
            |negation| negation.is_some(),
        ),
        rest,
    ))(input)
}
