//! Fragment-identifier mini-protocol: `#/`, `#/machine/<id>`, `#/runbooks`,
//! `#/commissioning`, `#/help`. Unknown fragments fall back to the overview.

use sf_core::MachineId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Overview,
    Machine(MachineId),
    Runbooks,
    Commissioning,
    Help,
}

impl Route {
    pub fn parse(fragment: &str) -> Route {
        match fragment {
            "" | "#" | "#/" => Route::Overview,
            "#/runbooks" => Route::Runbooks,
            "#/commissioning" => Route::Commissioning,
            "#/help" => Route::Help,
            other => other
                .strip_prefix("#/machine/")
                .and_then(|id| id.parse().ok())
                .map_or(Route::Overview, Route::Machine),
        }
    }

    pub fn fragment(&self) -> String {
        match self {
            Route::Overview => "#/".to_string(),
            Route::Machine(id) => format!("#/machine/{id}"),
            Route::Runbooks => "#/runbooks".to_string(),
            Route::Commissioning => "#/commissioning".to_string(),
            Route::Help => "#/help".to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Overview => "Overview",
            Route::Machine(_) => "Machine Detail",
            Route::Runbooks => "Runbooks",
            Route::Commissioning => "Commissioning",
            Route::Help => "Help",
        }
    }
}
