use std::fmt::{self, Display};

/// 张量的二元运算符
#[derive(Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Maximum,
    SwapRows,
}
impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operation_name = match self {
            Operator::Add => "相加",
            Operator::AddAssign => "自相加",
            Operator::Sub => "相减",
            Operator::SubAssign => "自相减",
            Operator::Mul => "相乘",
            Operator::MulAssign => "自相乘",
            Operator::Div => "相除",
            Operator::Maximum => "逐元素取最大值",
            Operator::SwapRows => "交换行",
        };
        write!(f, "{}", operation_name)
    }
}
