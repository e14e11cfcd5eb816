//! Page requests parsed from query parameters and the page envelope
//! returned by the list endpoints.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::model::employee::EmployeeField;

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query keys that may carry the sort expression, in priority order.
const SORT_KEYS: [&str; 4] = ["sort_by", "sortBy", "sortby", "sort"];

const SORT_SEPARATORS: &[char] = &[
    '[', ']', '{', '}', '(', ')', '|', '@', '&', '?', '$', '+', '-',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Anything starting with `d` is descending.
    fn parse(value: Option<&str>) -> Self {
        match value.and_then(|v| v.trim().chars().next()) {
            Some('d') | Some('D') => Direction::Desc,
            _ => Direction::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub property: EmployeeField,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: EmployeeField) -> Self {
        Self {
            property,
            direction: Direction::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.property.json_name(), self.direction.as_sql())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            sort: vec![SortOrder::asc(EmployeeField::DEFAULT_SORT)],
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            ..Self::default()
        }
    }

    pub fn from_query(params: &HashMap<String, String>) -> AppResult<Self> {
        if params.is_empty() {
            return Ok(Self::default());
        }

        let page = parse_number(params.get("page")).unwrap_or(DEFAULT_PAGE);
        let size = parse_number(params.get("size")).unwrap_or(DEFAULT_PAGE_SIZE);

        let sort_expr = SORT_KEYS.iter().find_map(|key| params.get(*key));
        let mut sort = match sort_expr {
            Some(expr) => parse_sort(expr)?,
            None => Vec::new(),
        };
        if sort.is_empty() {
            sort.push(SortOrder::asc(EmployeeField::DEFAULT_SORT));
        }

        Ok(Self {
            sort,
            ..Self::new(page, size)
        })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

fn parse_number(value: Option<&String>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}

/// `firstName.desc email,asc` becomes `[firstName DESC, email ASC]`.
/// Repeated tokens are dropped, the first occurrence wins.
pub fn parse_sort(expr: &str) -> AppResult<Vec<SortOrder>> {
    let mut seen: Vec<&str> = Vec::new();
    let mut orders: Vec<SortOrder> = Vec::new();

    let tokens = expr
        .split(|c: char| c.is_whitespace() || SORT_SEPARATORS.contains(&c))
        .filter(|t| !t.is_empty());

    for token in tokens {
        if seen.contains(&token) {
            continue;
        }
        seen.push(token);

        let (property, direction) = split_token(token);
        let field = EmployeeField::from_sort_key(property).ok_or_else(|| {
            AppError::InvalidRequest(format!("Unknown sort property: {}", property))
        })?;
        if orders.iter().any(|o| o.property == field) {
            continue;
        }
        orders.push(SortOrder {
            property: field,
            direction: Direction::parse(direction),
        });
    }

    Ok(orders)
}

/// Splits `property.direction` or `property,direction`. A trailing
/// `asc`/`desc` segment after `salary.amount` is still read as direction.
fn split_token(token: &str) -> (&str, Option<&str>) {
    if let Some((property, direction)) = token.split_once(',') {
        return (property, Some(direction));
    }
    match token.rsplit_once('.') {
        Some((property, last)) if is_direction(last) => (property, Some(last)),
        Some((property, last)) if EmployeeField::from_sort_key(token).is_none() => {
            (property, Some(last))
        }
        _ => (token, None),
    }
}

fn is_direction(value: &str) -> bool {
    value.eq_ignore_ascii_case("asc") || value.eq_ignore_ascii_case("desc")
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page: u32,
    pub size: u32,
    pub sort: Vec<String>,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1);
        Self {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(size)),
            page: request.page,
            size,
            sort: request.sort.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page: self.page,
            size: self.size,
            sort: self.sort,
        }
    }
}
