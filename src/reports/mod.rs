pub mod daily_transactions;
