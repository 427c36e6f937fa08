pub mod compare;
pub mod grundy_value;
pub mod mex;
pub mod nim_sum;
pub mod subtraction;
