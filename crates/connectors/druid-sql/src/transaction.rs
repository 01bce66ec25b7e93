use crate::error::Error;

/// The engine has no transactions; committing and rolling back do nothing.
#[derive(Debug, Default)]
pub struct Transaction {
    _private: (),
}

impl Transaction {
    pub(crate) fn new() -> Self {
        Transaction::default()
    }

    pub fn commit(self) -> Result<(), Error> {
        Ok(())
    }

    pub fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}
