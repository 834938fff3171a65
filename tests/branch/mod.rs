mod create_branch;
mod create_branch_with_invalid_name;
mod delete_branch;
