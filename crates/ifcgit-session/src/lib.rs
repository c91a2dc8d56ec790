mod session;

pub use session::IfcGitSession;
