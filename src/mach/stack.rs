use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector

pub struct Stack<T> {
    overflow_message: &'static str,
    max_len: usize,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str, max_len: usize) -> Stack<T> {
        Stack {
            overflow_message,
            max_len,
            vec: vec![],
        }
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    pub fn truncate(&mut self, len: usize) {
        self.vec.truncate(len)
    }
    /// Index of the topmost entry matching the predicate.
    pub fn rposition<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.vec.iter().rposition(predicate)
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        if self.vec.len() >= self.max_len {
            return Err(error!(OutOfMemory; self.overflow_message));
        }
        self.vec.push(val);
        Ok(())
    }
    pub fn pop(&mut self) -> Option<T> {
        self.vec.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_overflow() {
        let mut stack: Stack<u8> = Stack::new("STACK OVERFLOW", 2);
        assert!(stack.push(1).is_ok());
        assert!(stack.push(2).is_ok());
        let e = stack.push(3).unwrap_err();
        assert_eq!(e.code(), ErrorCode::OutOfMemory);
        assert_eq!(e.detail(), "STACK OVERFLOW");
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_rposition_truncate() {
        let mut stack: Stack<char> = Stack::new("", 10);
        for c in "ABCB".chars() {
            stack.push(c).unwrap();
        }
        assert_eq!(stack.rposition(|c| *c == 'B'), Some(3));
        assert_eq!(stack.rposition(|c| *c == 'A'), Some(0));
        stack.truncate(1);
        assert_eq!(stack.last(), Some(&'A'));
        assert_eq!(stack.pop(), Some('A'));
        assert_eq!(stack.pop(), None);
    }
}
