mod merge_preconditions;
mod merge_three_way;
