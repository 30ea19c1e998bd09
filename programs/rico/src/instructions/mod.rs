pub mod utils;
pub mod deploy;
pub mod init;
pub mod deposit_tokens;
pub mod commit;
pub mod cancel;
pub mod whitelist;
pub mod return_tokens;
pub mod project_withdraw;
pub mod views;

pub use deploy::*;
pub use init::*;
pub use deposit_tokens::*;
pub use commit::*;
pub use cancel::*;
pub use whitelist::*;
pub use return_tokens::*;
pub use project_withdraw::*;
pub use views::*;
