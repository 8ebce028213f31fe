use thiserror::Error;

/// Problems with a single `Valve XX has flow rate=N; ...` line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected line format: {0}")]
    UnexpectedFormat(String),

    #[error("invalid valve name: {0:?}")]
    InvalidName(String),

    #[error("invalid flow rate: {0:?}")]
    InvalidFlowRate(String),

    #[error("invalid neighbor name: {0:?}")]
    InvalidNeighbor(String),

    #[error("valve {0} has no tunnels")]
    NoTunnels(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("valve {0} is declared more than once")]
    DuplicateValve(String),

    #[error("valve {valve} has a tunnel to undeclared valve {neighbor}")]
    UnknownNeighbor { valve: String, neighbor: String },

    #[error("start valve {0} not found")]
    StartNotFound(String),

    #[error("{count} valves have a non-zero flow rate, at most {max} are supported")]
    TooManyUsefulValves { count: usize, max: usize },

    #[error("valve {valve} can't be reached from {start}")]
    Unreachable { valve: String, start: String },

    #[error("valve {valve} has a one-way tunnel to {neighbor}")]
    OneWayTunnel { valve: String, neighbor: String },

    #[error("released pressure over {minutes} minutes doesn't fit in a usize")]
    Overflow { minutes: usize },

    #[error("search gave up after {limit} states")]
    StateLimit { limit: usize },

    #[error("read input: {0}")]
    Io(#[from] std::io::Error),
}
