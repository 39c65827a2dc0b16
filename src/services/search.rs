//! Customer search state.
//!
//! Pagination is cursor based: `last_row_ids` is the stack of the last
//! customer ids of the pages already seen, and its top is the `after` cursor
//! sent to the salon API.

use serde::Serialize;
use tracing::debug;

use crate::models::customer::Customer;
use crate::services::query_string::{self, QueryMap, QuerySchema, QueryValue};

/// Where a search result's "Create appointment" action leads
pub const ADD_APPOINTMENT_PATH: &str = "/addAppointment";

pub const SEARCH_QUERY_SCHEMA: QuerySchema<'static> = QuerySchema {
    numeric: &["limit"],
    lists: &["lastRowIds"],
};

/// Query sent to `GET /customers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerQuery {
    pub after: Option<String>,
    pub search_term: String,
    pub limit: Option<usize>,
}

impl CustomerQuery {
    pub fn to_query_string(&self) -> String {
        let mut params = QueryMap::new();
        if let Some(after) = &self.after {
            params.insert("after".to_string(), QueryValue::from(after.as_str()));
        }
        params.insert(
            "searchTerm".to_string(),
            QueryValue::from(self.search_term.as_str()),
        );
        if let Some(limit) = self.limit {
            params.insert("limit".to_string(), QueryValue::Number(limit as i64));
        }
        query_string::encode(&params)
    }
}

/// Search state carried in the `/searchCustomers` query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub search_term: String,
    pub limit: Option<usize>,
    pub last_row_ids: Vec<String>,
}

impl SearchParams {
    pub fn from_query(query: &str) -> Self {
        let decoded = query_string::decode(query, &SEARCH_QUERY_SCHEMA);

        let search_term = decoded
            .get("searchTerm")
            .and_then(QueryValue::as_text)
            .unwrap_or_default()
            .to_string();
        let limit = decoded
            .get("limit")
            .and_then(QueryValue::as_number)
            .and_then(|limit| usize::try_from(limit).ok())
            .filter(|limit| *limit > 0);
        let last_row_ids = decoded
            .get("lastRowIds")
            .and_then(QueryValue::as_list)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        Self {
            search_term,
            limit,
            last_row_ids,
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut params = QueryMap::new();
        params.insert(
            "searchTerm".to_string(),
            QueryValue::from(self.search_term.as_str()),
        );
        if let Some(limit) = self.limit {
            params.insert("limit".to_string(), QueryValue::Number(limit as i64));
        }
        params.insert(
            "lastRowIds".to_string(),
            QueryValue::List(self.last_row_ids.clone()),
        );
        query_string::encode(&params)
    }

    pub fn page_size(&self, default_page_size: usize) -> usize {
        self.limit.unwrap_or(default_page_size)
    }

    pub fn api_query(&self, default_page_size: usize) -> CustomerQuery {
        CustomerQuery {
            after: self.last_row_ids.last().cloned(),
            search_term: self.search_term.clone(),
            limit: Some(self.page_size(default_page_size)),
        }
    }

    /// A full page means there may be more rows after it
    pub fn has_next(&self, customers: &[Customer], default_page_size: usize) -> bool {
        customers.len() == self.page_size(default_page_size)
    }

    pub fn has_previous(&self) -> bool {
        !self.last_row_ids.is_empty()
    }

    pub fn next(&self, customers: &[Customer], default_page_size: usize) -> Option<Self> {
        if !self.has_next(customers, default_page_size) {
            return None;
        }
        let last_id = customers.last()?.id?;
        let mut last_row_ids = self.last_row_ids.clone();
        last_row_ids.push(last_id.to_string());
        debug!("Moving to page after customer {}", last_id);
        Some(Self {
            last_row_ids,
            ..self.clone()
        })
    }

    pub fn previous(&self) -> Option<Self> {
        if !self.has_previous() {
            return None;
        }
        let mut last_row_ids = self.last_row_ids.clone();
        last_row_ids.pop();
        Some(Self {
            last_row_ids,
            ..self.clone()
        })
    }

    /// A new search term starts again from the first page
    pub fn with_search_term(&self, search_term: &str) -> Self {
        Self {
            search_term: search_term.to_string(),
            limit: self.limit,
            last_row_ids: Vec::new(),
        }
    }

    /// Changing the page size starts again from the first page
    pub fn with_limit(&self, limit: usize) -> Self {
        Self {
            search_term: self.search_term.clone(),
            limit: Some(limit),
            last_row_ids: Vec::new(),
        }
    }
}

/// A customer row with the actions offered next to it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRow {
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_appointment_path: Option<String>,
}

impl CustomerRow {
    pub fn new(customer: Customer) -> Self {
        let create_appointment_path = customer
            .id
            .map(|id| format!("{}?customer={}", ADD_APPOINTMENT_PATH, id));
        Self {
            customer,
            create_appointment_path,
        }
    }
}

/// One page of search results, as returned by `/searchCustomers`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub customers: Vec<CustomerRow>,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_path: Option<String>,
    pub previous_path: Option<String>,
}

impl SearchPage {
    pub fn build(
        pathname: &str,
        params: &SearchParams,
        customers: Vec<Customer>,
        default_page_size: usize,
    ) -> Self {
        // A full page whose last row has no id gives no cursor to move on from
        let next_path = params
            .next(&customers, default_page_size)
            .map(|next| format!("{}{}", pathname, next.to_query_string()));
        let previous_path = params
            .previous()
            .map(|previous| format!("{}{}", pathname, previous.to_query_string()));

        Self {
            has_next: next_path.is_some(),
            has_previous: previous_path.is_some(),
            customers: customers.into_iter().map(CustomerRow::new).collect(),
            next_path,
            previous_path,
        }
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;
