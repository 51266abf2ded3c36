use crate::hui::{
    build_tree, prune_and_sort, HuiError, HuiMiner, HuiSession, MiningConfig, MiningResult,
    Transaction, TransactionItem, UnitUtilities,
};
use once_cell::sync::Lazy;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashMap;
use std::sync::Mutex;

type PyTransactions = Vec<Vec<(String, f64)>>;
type PyItemsets = Vec<(Vec<String>, f64, usize)>;

// Sessions live here between calls from Python
static SESSIONS: Lazy<Mutex<HashMap<usize, HuiSession<String>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));
static NEXT_SID: Lazy<Mutex<usize>> = Lazy::new(|| Mutex::new(0));

impl From<HuiError> for PyErr {
    fn from(err: HuiError) -> Self {
        match err {
            HuiError::InvalidPhase { .. } => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

fn to_transactions(raw: PyTransactions) -> Vec<Transaction<String>> {
    raw.into_iter()
        .map(|transaction| transaction.into_iter().map(TransactionItem::from).collect())
        .collect()
}

fn to_py_itemsets(result: MiningResult<String>) -> (PyItemsets, bool) {
    let itemsets = result
        .itemsets
        .into_iter()
        .map(|found| (found.items.into_iter().collect(), found.utility, found.count))
        .collect();
    (itemsets, result.truncated)
}

fn with_session<T>(
    sid: usize,
    f: impl FnOnce(&mut HuiSession<String>) -> Result<T, HuiError>,
) -> PyResult<T> {
    let mut sessions = SESSIONS
        .lock()
        .map_err(|e| PyRuntimeError::new_err(format!("Lock error: {}", e)))?;
    let session = sessions
        .get_mut(&sid)
        .ok_or_else(|| PyValueError::new_err("Invalid session ID"))?;
    Ok(f(session)?)
}

#[pymodule]
fn hui_growth(m: &Bound<'_, PyModule>) -> PyResult<()> {
    #[pyfn(m)]
    #[pyo3(name = "mine_huis")]
    #[pyo3(signature = (transactions, utilities, min_util, max_itemset_len=None, max_expansions=None))]
    fn mine_huis_py(
        py: Python<'_>,
        transactions: PyTransactions,
        utilities: UnitUtilities<String>,
        min_util: f64,
        max_itemset_len: Option<usize>,
        max_expansions: Option<usize>,
    ) -> PyResult<(PyItemsets, bool)> {
        let transactions = to_transactions(transactions);
        let config = MiningConfig {
            min_util,
            max_itemset_len,
            max_expansions,
            parallel: true,
        };

        let result = py.allow_threads(|| {
            let sorted_items = prune_and_sort(&transactions, min_util, &utilities)?;
            let tree = build_tree(&transactions, &sorted_items, &utilities)?;
            HuiMiner::new(config).mine(&tree)
        })?;

        Ok(to_py_itemsets(result))
    }

    #[pyfn(m)]
    #[pyo3(name = "create_session")]
    fn create_session_py(utilities: UnitUtilities<String>) -> PyResult<usize> {
        let mut sid_lock = NEXT_SID
            .lock()
            .map_err(|e| PyRuntimeError::new_err(format!("Lock error: {}", e)))?;
        let sid = *sid_lock;
        *sid_lock += 1;
        drop(sid_lock);

        let mut sessions = SESSIONS
            .lock()
            .map_err(|e| PyRuntimeError::new_err(format!("Lock error: {}", e)))?;
        sessions.insert(sid, HuiSession::new(utilities));

        Ok(sid)
    }

    #[pyfn(m)]
    #[pyo3(name = "session_count_pass")]
    fn session_count_pass_py(sid: usize, transactions: PyTransactions) -> PyResult<()> {
        let transactions = to_transactions(transactions);
        with_session(sid, |session| session.count_pass(&transactions))
    }

    #[pyfn(m)]
    #[pyo3(name = "session_finalize_counts")]
    fn session_finalize_counts_py(sid: usize, min_util: f64) -> PyResult<Vec<String>> {
        with_session(sid, |session| {
            session.finalize_counts(min_util).map(|items| items.to_vec())
        })
    }

    #[pyfn(m)]
    #[pyo3(name = "session_build_pass")]
    fn session_build_pass_py(sid: usize, transactions: PyTransactions) -> PyResult<()> {
        let transactions = to_transactions(transactions);
        with_session(sid, |session| session.build_pass(&transactions))
    }

    #[pyfn(m)]
    #[pyo3(name = "session_finalize_building")]
    fn session_finalize_building_py(sid: usize) -> PyResult<()> {
        with_session(sid, |session| session.finalize_building())
    }

    #[pyfn(m)]
    #[pyo3(name = "session_mine")]
    fn session_mine_py(sid: usize) -> PyResult<(PyItemsets, bool)> {
        let result = with_session(sid, |session| session.mine())?;
        Ok(to_py_itemsets(result))
    }

    #[pyfn(m)]
    #[pyo3(name = "session_update")]
    fn session_update_py(
        sid: usize,
        transactions: PyTransactions,
    ) -> PyResult<(usize, Vec<(String, f64)>)> {
        let transactions = to_transactions(transactions);
        let report = with_session(sid, |session| session.update(&transactions))?;
        let flagged = report
            .new_high_utility_items
            .into_iter()
            .map(|candidate| (candidate.item, candidate.twu))
            .collect();
        Ok((report.inserted, flagged))
    }

    #[pyfn(m)]
    #[pyo3(name = "session_cleanup")]
    fn session_cleanup_py(sid: usize) -> PyResult<()> {
        let mut sessions = SESSIONS
            .lock()
            .map_err(|e| PyRuntimeError::new_err(format!("Lock error: {}", e)))?;

        sessions
            .remove(&sid)
            .ok_or_else(|| PyValueError::new_err("Invalid session ID"))?;

        Ok(())
    }

    Ok(())
}
