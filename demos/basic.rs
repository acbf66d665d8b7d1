use std::error::Error;

use positional::{
    BinaryTree, DoublyLinkedList, LinkedBinaryTree, LinkedTree, PositionalList, PostOrder,
    TraversalOrder, Visit,
};

fn main() -> Result<(), Box<dyn Error>> {
    let mut list = DoublyLinkedList::new();
    println!("Add 1, 3 to list");
    let one = list.add_last(1);
    let three = list.add_last(3);
    println!("Add 2 after 1");
    list.add_after(one, 2)?;
    println!("Add 0 before 1");
    list.add_before(one, 0)?;
    println!("List: {:?}", list);

    println!("Remove 3");
    list.remove(three)?;
    match list.get(three) {
        Ok(_) => println!("3 is still reachable?"),
        Err(err) => println!("Position of 3 is stale: {}", err),
    }

    let mut tree = LinkedTree::new();
    let root = tree.add_root("root")?;
    let node1 = tree.add_child(root, "1")?;
    tree.add_child(root, "2")?;
    tree.add_child(node1, "3")?;
    println!("Tree:\n{}", tree);

    let names = tree
        .iter(TraversalOrder::BreadthFirst)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>();
    println!("Breadth first: {:?}", names);

    let mut expr = LinkedBinaryTree::new();
    let plus = expr.add_root("+")?;
    expr.add_left(plus, "2")?;
    let times = expr.add_right(plus, "*")?;
    expr.add_left(times, "3")?;
    expr.add_right(times, "4")?;

    let mut rpn = Vec::new();
    expr.traverse_binary(&mut PostOrder::new(|e: &&str, _: Visit<'_, _>| {
        rpn.push(e.to_string())
    }))?;
    println!("Postfix: {}", rpn.join(" "));

    Ok(())
}
