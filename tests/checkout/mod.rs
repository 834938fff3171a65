mod checkout_branch;
mod reset;
