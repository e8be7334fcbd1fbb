mod common;
mod heuristic;
mod routing;
