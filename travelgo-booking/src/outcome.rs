use serde::Serialize;
use serde_json::{Map, Value};
use travelgo_catalog::Category;
use travelgo_core::CoreError;

/// Named views understood by the rendering layer
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Index,
    Bus,
    Train,
    Flight,
    Hotels,
    Register,
    Login,
    Dashboard,
    SelectSeats,
    Payment,
    Ticket,
    Admin,
}

impl View {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Bus => View::Bus,
            Category::Train => View::Train,
            Category::Flight => View::Flight,
            Category::Hotel => View::Hotels,
        }
    }
}

/// Context key the search views read their results from.
pub fn results_key(category: Category) -> &'static str {
    match category {
        Category::Bus => "buses",
        Category::Train => "trains",
        Category::Flight => "flights",
        Category::Hotel => "hotels",
    }
}

/// A view plus the data it is rendered with. Markup is produced elsewhere.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page {
    pub view: View,
    pub context: Map<String, Value>,
}

impl Page {
    pub fn new(view: View) -> Self {
        Self { view, context: Map::new() }
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.context.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Dashboard,
    SelectSeats,
    Admin,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::SelectSeats => "/select_seats",
            Route::Admin => "/admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Render(Page),
    Redirect(Route),
    NotFound(String),
    BadRequest(String),
    Failed(String),
}

/// How the transition really went, independent of what the user is shown.
#[derive(Debug)]
pub enum Completion {
    Succeeded,
    /// The request was refused; the reply says why or redirects.
    Rejected(CoreError),
    /// Shown with partial data, e.g. an empty booking list.
    Degraded(CoreError),
    /// Failed, but the user is told it worked.
    Swallowed(CoreError),
    /// Failed and reported as a fault.
    Failed(CoreError),
}

#[derive(Debug)]
pub struct Step {
    pub reply: Reply,
    pub completion: Completion,
}

impl Step {
    pub fn render(page: Page) -> Self {
        Self { reply: Reply::Render(page), completion: Completion::Succeeded }
    }

    pub fn redirect(route: Route) -> Self {
        Self { reply: Reply::Redirect(route), completion: Completion::Succeeded }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            reply: Reply::NotFound(message.to_string()),
            completion: Completion::Rejected(CoreError::NotFound(message.to_string())),
        }
    }

    pub fn bad_request(err: CoreError) -> Self {
        Self { reply: Reply::BadRequest(err.to_string()), completion: Completion::Rejected(err) }
    }

    pub fn failed(err: CoreError) -> Self {
        Self { reply: Reply::Failed(err.to_string()), completion: Completion::Failed(err) }
    }

    pub fn rejected(mut self, err: CoreError) -> Self {
        self.completion = Completion::Rejected(err);
        self
    }

    pub fn degraded(mut self, err: CoreError) -> Self {
        self.completion = Completion::Degraded(err);
        self
    }

    pub fn swallowed(mut self, err: CoreError) -> Self {
        self.completion = Completion::Swallowed(err);
        self
    }

    pub fn page(&self) -> Option<&Page> {
        match &self.reply {
            Reply::Render(page) => Some(page),
            _ => None,
        }
    }

    pub fn redirects_to(&self, route: Route) -> bool {
        self.reply == Reply::Redirect(route)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self.completion, Completion::Succeeded)
    }
}
