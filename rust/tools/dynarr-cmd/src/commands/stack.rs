//! Stack command implementation

use anyhow::{Context, Result};
use dynarr_stack::Stack;

/// Pops until the stack is empty, returning the values in pop order.
fn drain(stack: &mut Stack<String>) -> Result<Vec<String>> {
    let mut popped = Vec::with_capacity(stack.len());
    while !stack.is_empty() {
        let top = stack.top().context("Failed to read stack top")?;
        log::debug!("top = {top}, {} remaining", stack.len());
        popped.push(stack.pop().context("Failed to pop stack")?);
    }
    Ok(popped)
}

pub fn run(values: Vec<String>) -> Result<()> {
    let mut stack: Stack<String> = values.into_iter().collect();
    println!("Pushed {} value(s)", stack.len());
    for value in drain(&mut stack)? {
        println!("pop -> {value}");
    }

    // One more pop shows how an empty stack reports the violation.
    match stack.pop() {
        Ok(value) => anyhow::bail!("Pop on an empty stack returned {value}"),
        Err(e) => println!("pop -> error: {e}"),
    }
    Ok(())
}
