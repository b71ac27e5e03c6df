use std::str::FromStr;

use scopegate_core::AppError;

pub mod authorization;
pub mod employees;
pub mod groups;
pub mod health;

fn parse_id<T>(value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = AppError>,
{
    value.trim().parse()
}

fn parse_optional_id<T>(value: Option<&str>) -> Result<Option<T>, AppError>
where
    T: FromStr<Err = AppError>,
{
    value
        .filter(|value| !value.trim().is_empty())
        .map(parse_id)
        .transpose()
}
