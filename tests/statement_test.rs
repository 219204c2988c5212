mod common;
use basic::mach::{Address, Config, Event};
use common::*;

#[test]
fn test_straight_line() {
    let s = exec("10 LET X = 3\n20 LET Y = 4\n30 PRINT X + Y\n40 END\n");
    assert_eq!(s, "7\n");
}

#[test]
fn test_last_definition_wins() {
    let s = exec("10 PRINT \"A\"\n20 END\n10 PRINT \"B\"\n");
    assert_eq!(s, "B\n");
}

#[test]
fn test_bare_line_number_deletes() {
    let s = exec("10 PRINT \"A\"\n20 PRINT \"B\"\n10\n");
    assert_eq!(s, "B\n");
}

#[test]
fn test_for_loop_skipped_when_past_end() {
    let s = exec("10 FOR I = 1 TO 0 STEP 1\n20 PRINT \"BODY\"\n30 NEXT I\n40 PRINT \"DONE\";I\n");
    assert_eq!(s, "DONE1\n");
}

#[test]
fn test_for_loop_negative_step() {
    let s = exec("10 FOR I = 5 TO 1 STEP -1\n20 PRINT I;\n30 NEXT I\n40 PRINT\n50 PRINT I\n");
    assert_eq!(s, "54321\n0\n");
}

#[test]
fn test_for_loop_on_one_line() {
    assert_eq!(exec("10 FOR I=1 TO 3:PRINT I;\",\";:NEXT\n"), "1,2,3,");
}

#[test]
fn test_for_loop_skips_nested_loops() {
    let s = exec("10 FOR I=1 TO 0\n20 FOR J=1 TO 3\n30 NEXT J\n40 NEXT I\n50 PRINT \"OK\"\n");
    assert_eq!(s, "OK\n");
}

#[test]
fn test_next_list() {
    let s = exec("10 FOR I=1 TO 2:FOR J=1 TO 2\n20 PRINT I;J;\" \";\n30 NEXT J,I\n");
    assert_eq!(s, "11 12 21 22 ");
}

#[test]
fn test_unnamed_next_closes_innermost() {
    let s = exec("10 FOR I=1 TO 2\n20 FOR J=1 TO 2\n30 PRINT I;J;\" \";\n40 NEXT\n50 NEXT\n");
    assert_eq!(s, "11 12 21 22 ");
}

#[test]
fn test_named_next_closes_inner_loops() {
    let s = exec("10 FOR I=1 TO 2\n20 FOR J=1 TO 5\n30 PRINT I;J;\n40 NEXT I\n50 PRINT \"/\"\n");
    assert_eq!(s, "1121/\n");
}

#[test]
fn test_breaking_out_of_for_loop_with_goto() {
    let s = exec("10 FOR Y=1 TO 2\n20 FOR X=8 TO 9\n30 PRINT Y;X\n40 GOTO 60\n50 NEXT\n60 NEXT Y\n");
    assert_eq!(s, "18\n28\n");
}

#[test]
fn test_for_loop_reentered() {
    let mut r = load("10 FOR I=1 TO 2:FOR J=1 TO 2:GOTO 10\n");
    assert_eq!(r.execute(3), Event::Running);
    assert_eq!(r.for_depth(), 2);
    assert_eq!(r.execute(1), Event::Running);
    assert_eq!(r.for_depth(), 1);
}

#[test]
fn test_next_without_for() {
    assert_eq!(exec("10 NEXT\n"), "?NEXT WITHOUT FOR IN 10\n");
    assert_eq!(
        exec("10 FOR I=1 TO 2\n20 NEXT J\n"),
        "?NEXT WITHOUT FOR IN 20; J\n"
    );
}

#[test]
fn test_for_without_next() {
    assert_eq!(
        exec("10 FOR I=2 TO 1\n20 PRINT I\n"),
        "?FOR WITHOUT NEXT IN 10; I\n"
    );
}

#[test]
fn test_for_step_zero() {
    assert_eq!(
        exec("10 FOR I=1 TO 2 STEP 0\n20 NEXT\n"),
        "?ILLEGAL FUNCTION CALL IN 10; FOR STEP 0\n"
    );
}

#[test]
fn test_gosub_return() {
    let s = exec("10 GOSUB 100\n20 PRINT \"WORLD\"\n90 END\n100 PRINT \"HELLO \";\n110 RETURN\n");
    assert_eq!(s, "HELLO WORLD\n");
}

#[test]
fn test_gosub_mid_line() {
    assert_eq!(exec("10 A=1:GOSUB 100:PRINT A:END\n100 A=A+1:RETURN\n"), "2\n");
}

#[test]
fn test_recursive_gosub() {
    let s = exec("10 GOSUB 100\n20 PRINT D\n30 END\n100 D=D+1:IF D<5 THEN GOSUB 100\n110 RETURN\n");
    assert_eq!(s, "5\n");
}

#[test]
fn test_return_resumes_after_gosub() {
    let mut r = load("10 GOSUB 100:PRINT \"BACK\"\n20 END\n100 GOSUB 200\n110 RETURN\n200 RETURN\n");
    assert_eq!(r.execute(2), Event::Running);
    assert_eq!(r.gosub_depth(), 2);
    assert_eq!(r.line_number(), Some(200));
    assert_eq!(r.execute(1), Event::Running);
    assert_eq!(r.gosub_depth(), 1);
    assert_eq!(r.execute(1), Event::Running);
    assert_eq!(r.gosub_depth(), 0);
    assert_eq!(r.instruction_pointer(), Address { line: 0, offset: 1 });
    assert_eq!(r.line_number(), Some(10));
    assert_eq!(run(&mut r, &[]), "BACK\n");
}

#[test]
fn test_return_without_gosub() {
    assert_eq!(exec("10 RETURN\n"), "?RETURN WITHOUT GOSUB IN 10\n");
}

#[test]
fn test_undefined_line() {
    assert_eq!(exec("10 GOTO 50\n"), "?UNDEFINED LINE IN 10; 50\n");
    assert_eq!(exec("10 PRINT 1\n20 GOSUB 5\n"), "1\n?UNDEFINED LINE IN 20; 5\n");
}

#[test]
fn test_gosub_stack_overflow() {
    let config = Config {
        stack_limit: 10,
        ..config()
    };
    assert_eq!(
        exec_with("10 GOSUB 10\n", &[], config),
        "?OUT OF MEMORY IN 10; GOSUB STACK OVERFLOW\n"
    );
}

#[test]
fn test_end() {
    assert_eq!(exec("10 PRINT 1\n20 END\n30 PRINT 2\n"), "1\n");
}

#[test]
fn test_stop() {
    assert_eq!(exec("10 PRINT 1\n20 STOP\n30 PRINT 2\n"), "1\n?BREAK IN 20\n");
}

#[test]
fn test_on_goto() {
    let s = exec(
        "10 FOR I=0 TO 3\n20 ON I GOTO 100,200\n30 PRINT \"NONE\"\n40 NEXT\n50 END\n\
         100 PRINT \"ONE\":GOTO 40\n200 PRINT \"TWO\":GOTO 40\n",
    );
    assert_eq!(s, "NONE\nONE\nTWO\nNONE\n");
}

#[test]
fn test_on_gosub() {
    let s = exec(
        "10 ON 2 GOSUB 100,200:PRINT \"BACK\"\n20 END\n\
         100 PRINT \"A\":RETURN\n200 PRINT \"B\":RETURN\n",
    );
    assert_eq!(s, "B\nBACK\n");
}

#[test]
fn test_on_out_of_range() {
    assert_eq!(
        exec("10 ON -1 GOTO 10\n"),
        "?ILLEGAL FUNCTION CALL IN 10; ON INDEX\n"
    );
}

#[test]
fn test_read_data() {
    let s = exec("10 READ A,B$,C\n20 PRINT A;B$;C\n30 DATA 1,\"HI, THERE\"\n40 DATA 3\n");
    assert_eq!(s, "1HI, THERE3\n");
}

#[test]
fn test_restore() {
    assert_eq!(exec("10 READ A:RESTORE:READ B:PRINT A;B\n20 DATA 7,8\n"), "77\n");
    let s = exec("10 READ A:RESTORE 30:READ B:PRINT A;B\n20 DATA 1\n30 DATA 2\n");
    assert_eq!(s, "12\n");
}

#[test]
fn test_out_of_data() {
    assert_eq!(exec("10 READ A,B\n20 DATA 1\n"), "?OUT OF DATA IN 10\n");
}

#[test]
fn test_read_type_mismatch() {
    assert_eq!(exec("10 READ A\n20 DATA X\n"), "?TYPE MISMATCH IN 10; DATA X\n");
}

#[test]
fn test_def_fn() {
    let s = exec("10 DEF FNA(X)=X*X+Y\n20 X=5:Y=1\n30 PRINT FNA(3);\" \";X\n");
    assert_eq!(s, "10 5\n");
}

#[test]
fn test_def_fn_string() {
    let s = exec("10 DEF FNS$(A$)=A$+A$\n20 PRINT FNS$(\"AB\")\n");
    assert_eq!(s, "ABAB\n");
}

#[test]
fn test_undefined_user_function() {
    assert_eq!(exec("10 PRINT FNB(1)\n"), "?UNDEFINED USER FUNCTION IN 10; FNB\n");
}

#[test]
fn test_clear() {
    let s = exec("10 A=5:DIM B(3):CLEAR:PRINT A:DIM B(3):PRINT \"OK\"\n");
    assert_eq!(s, "0\nOK\n");
}

#[test]
fn test_remarks() {
    assert_eq!(exec("10 REM PRINT 1\n20 ' COMMENT\n30 PRINT 2\n"), "2\n");
}

#[test]
fn test_go_to_spelling() {
    assert_eq!(exec("10 GO TO 30\n20 PRINT 1\n30 PRINT 2\n"), "2\n");
}

#[test]
fn test_syntax_error_stops_load() {
    let s = exec("10 PRINT 1\n20 LET = 5\n");
    assert!(s.starts_with("?SYNTAX ERROR IN 20"));
    assert!(!s.contains("1\n?"));
}

#[test]
fn test_illegal_character() {
    assert_eq!(
        exec("10 PRINT 1\n20 A = 1 @ 2\n"),
        "?ILLEGAL CHARACTER IN 20 (6..7); @\n"
    );
}

#[test]
fn test_direct_statement_in_file() {
    assert_eq!(
        exec("10 PRINT 1\nPRINT 2\n"),
        "?DIRECT STATEMENT IN FILE; SOURCE LINE 2\n"
    );
}
