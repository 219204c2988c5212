mod common;
use common::*;

fn reserved(source: &str) -> bool {
    let s = exec(source);
    s.starts_with("?SYNTAX ERROR IN 20") && s.ends_with("; RESERVED FOR BUILT-IN\n")
}

#[test]
fn test_built_in_reserved() {
    assert!(reserved("10 PRINT \"RAN\"\n20 LEN=5\n"));
    assert!(reserved("10 PRINT \"RAN\"\n20 RND=42\n"));
    assert!(reserved("10 PRINT \"RAN\"\n20 TIME$=\"42\"\n"));
    assert!(reserved("10 PRINT \"RAN\"\n20 FOR SIN=1 TO 2\n"));
    assert!(reserved("10 PRINT \"RAN\"\n20 INPUT A,LEFT$\n"));
    assert!(reserved("10 PRINT \"RAN\"\n20 READ VAL\n"));
}

#[test]
fn test_built_in_in_expression() {
    assert_eq!(exec("10 A=LEN(\"ABC\")\n20 PRINT A\n"), "3\n");
}

#[test]
fn test_fn_numeric() {
    assert_eq!(exec("10 PRINT ABS(9);ABS(-9)\n"), "99\n");
    assert_eq!(exec("10 PRINT INT(-2.5);INT(2.5)\n"), "-32\n");
    assert_eq!(exec("10 PRINT SGN(-3):PRINT SGN(0):PRINT SGN(7)\n"), "-1\n0\n1\n");
    assert_eq!(exec("10 PRINT SQR(16)\n"), "4\n");
    assert_eq!(exec("10 PRINT COS(0);SIN(0);TAN(0);ATN(0)\n"), "1000\n");
    assert_eq!(exec("10 PRINT EXP(0);LOG(1)\n"), "10\n");
}

#[test]
fn test_fn_string() {
    assert_eq!(exec("10 PRINT LEN(\"HELLO\")\n"), "5\n");
    assert_eq!(exec("10 PRINT LEFT$(\"HELLO\",2)\n"), "HE\n");
    assert_eq!(exec("10 PRINT RIGHT$(\"HELLO\",3)\n"), "LLO\n");
    assert_eq!(exec("10 PRINT MID$(\"HELLO\",2,3);MID$(\"HELLO\",4)\n"), "ELLLO\n");
    assert_eq!(exec("10 PRINT STR$(42);\"|\";STR$(-7)\n"), " 42|-7\n");
    assert_eq!(exec("10 PRINT VAL(\"12.5\")+1\n"), "13.5\n");
    assert_eq!(exec("10 PRINT CHR$(65);ASC(\"A\")\n"), "A65\n");
}

#[test]
fn test_fn_errors() {
    assert_eq!(exec("10 PRINT SQR(-1)\n"), "?ILLEGAL FUNCTION CALL IN 10; SQR\n");
    assert_eq!(exec("10 PRINT LOG(0)\n"), "?ILLEGAL FUNCTION CALL IN 10; LOG\n");
    assert_eq!(exec("10 PRINT LEN(5)\n"), "?TYPE MISMATCH IN 10; LEN ARGUMENT 1\n");
    assert_eq!(
        exec("10 PRINT LEFT$(\"A\")\n"),
        "?ILLEGAL FUNCTION CALL IN 10; WRONG NUMBER OF ARGUMENTS TO LEFT$\n"
    );
    assert_eq!(
        exec("10 A$=TAB(3)\n"),
        "?ILLEGAL FUNCTION CALL IN 10; TAB IS ONLY VALID IN PRINT\n"
    );
}

#[test]
fn test_fn_rnd() {
    assert_eq!(exec("10 A=RND(1):B=RND(0):PRINT A=B\n"), "-1\n");
    assert_eq!(exec("10 A=RND:PRINT A>=0 AND A<1\n"), "-1\n");
    assert_eq!(exec("10 A=RND(-3):B=RND(-3):PRINT A=B\n"), "-1\n");
    assert_eq!(exec("10 PRINT RND(1)\n"), exec("10 PRINT RND(1)\n"));
}

#[test]
fn test_fn_clock() {
    assert_eq!(exec("10 PRINT LEN(DATE$);LEN(TIME$)\n"), "108\n");
}

#[test]
fn test_user_function_arguments() {
    assert_eq!(
        exec("10 DEF FNA(X)=X\n20 PRINT FNA(1,2)\n"),
        "?ILLEGAL FUNCTION CALL IN 20; FNA TAKES 1 ARGUMENT(S)\n"
    );
    assert_eq!(
        exec("10 DEF FNA(X)=X\n20 PRINT FNA(\"S\")\n"),
        "?TYPE MISMATCH IN 20; X\n"
    );
    assert_eq!(
        exec("10 DEF FNA(X)=FNA(X)\n20 PRINT FNA(1)\n"),
        "?OUT OF MEMORY IN 20; FN NESTING TOO DEEP\n"
    );
}
